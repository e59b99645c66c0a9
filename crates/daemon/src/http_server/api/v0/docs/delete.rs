use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use common::store::StoreError;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

use super::{error_response, store_error_response};

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct DeleteRequest {
    /// Document path relative to the docs directory
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Unlinks the document and removes it from the index in one step, so
/// a list issued right after the response never shows the entry.
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<DeleteRequest>,
) -> Result<impl IntoResponse, DeleteError> {
    let store = state.store().clone();
    tokio::task::spawn_blocking(move || store.delete(&req.path)).await??;

    Ok((
        http::StatusCode::OK,
        Json(DeleteResponse { success: true }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("delete task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match &self {
            DeleteError::Store(err) => store_error_response(err),
            DeleteError::Join(_) => error_response(http::StatusCode::INTERNAL_SERVER_ERROR, &self),
        }
    }
}

impl ApiRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut full_url = base_url.join("/api/v0/docs/entry").unwrap();
        full_url.query_pairs_mut().append_pair("path", &self.path);
        client.delete(full_url)
    }
}
