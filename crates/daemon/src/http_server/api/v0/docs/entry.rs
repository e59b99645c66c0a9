use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

use super::error_response;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct EntryRequest {
    /// Document path relative to the docs directory
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponse {
    pub content: String,
    pub ext: String,
}

/// Serves a document straight out of the index; disk is never touched
/// on the read path.
pub async fn handler(
    State(state): State<ServiceState>,
    Query(req): Query<EntryRequest>,
) -> Result<impl IntoResponse, EntryError> {
    if !state.guard().is_safe(&req.path) {
        return Err(EntryError::InvalidPath(req.path));
    }

    let found = {
        let index = state.index().read();
        index.get(&req.path).map(|entry| EntryResponse {
            content: entry.content.clone(),
            ext: entry.ext.clone(),
        })
    };
    let response = found.ok_or(EntryError::NotFound(req.path))?;

    Ok((http::StatusCode::OK, Json(response)).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("document not found: {0}")]
    NotFound(String),
}

impl IntoResponse for EntryError {
    fn into_response(self) -> Response {
        let status = match &self {
            EntryError::InvalidPath(_) => http::StatusCode::BAD_REQUEST,
            EntryError::NotFound(_) => http::StatusCode::NOT_FOUND,
        };
        error_response(status, self)
    }
}

impl ApiRequest for EntryRequest {
    type Response = EntryResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut full_url = base_url.join("/api/v0/docs/entry").unwrap();
        full_url.query_pairs_mut().append_pair("path", &self.path);
        client.get(full_url)
    }
}
