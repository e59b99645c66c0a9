use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use common::store::{StoreError, StoredDoc};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

use super::{error_response, store_error_response};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Name for the new document; directory components are dropped
    pub filename: String,
    /// Full document text
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub path: String,
    pub name: String,
    pub ext: String,
}

impl From<StoredDoc> for UploadResponse {
    fn from(doc: StoredDoc) -> Self {
        Self {
            path: doc.path,
            name: doc.name,
            ext: doc.ext,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<UploadRequest>,
) -> Result<impl IntoResponse, UploadError> {
    let store = state.store().clone();
    let doc = tokio::task::spawn_blocking(move || store.upload(&req.filename, &req.content))
        .await??;

    Ok((http::StatusCode::OK, Json(UploadResponse::from(doc))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("upload task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::Store(err) => store_error_response(err),
            UploadError::Join(_) => error_response(http::StatusCode::INTERNAL_SERVER_ERROR, &self),
        }
    }
}

impl ApiRequest for UploadRequest {
    type Response = UploadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/docs/upload").unwrap();
        client.post(full_url).json(&self)
    }
}
