use std::path::Path;

use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use common::store::{StoreError, StoredDoc};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

use super::{error_response, store_error_response};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// File to copy into the docs directory; resolved against the
    /// daemon's working directory when relative
    pub source_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub path: String,
    pub name: String,
    pub ext: String,
}

impl From<StoredDoc> for RegisterResponse {
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
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterError> {
    let store = state.store().clone();
    let doc = tokio::task::spawn_blocking(move || store.register(Path::new(&req.source_path)))
        .await??;

    Ok((http::StatusCode::OK, Json(RegisterResponse::from(doc))).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("register task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        match &self {
            RegisterError::Store(err) => store_error_response(err),
            RegisterError::Join(_) => {
                error_response(http::StatusCode::INTERNAL_SERVER_ERROR, &self)
            }
        }
    }
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/docs/register").unwrap();
        client.post(full_url).json(&self)
    }
}
