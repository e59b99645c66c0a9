//! Document management API endpoints
//!
//! REST surface over the in-memory index and the document store:
//! - List, read, and search indexed documents
//! - Register existing files, upload new content, delete documents

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::store::StoreError;

use crate::ServiceState;

mod delete;
mod entry;
mod list;
mod register;
mod search;
mod upload;

// Re-export request/response types for use by CLI and other clients
pub use delete::{DeleteRequest, DeleteResponse};
pub use entry::{EntryRequest, EntryResponse};
pub use list::{ListRequest, ListResponse};
pub use register::{RegisterRequest, RegisterResponse};
pub use search::{SearchRequest, SearchResponse};
pub use upload::{UploadRequest, UploadResponse};

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler))
        .route("/entry", get(entry::handler).delete(delete::handler))
        .route("/search", get(search::handler))
        .route("/register", post(register::handler))
        .route("/upload", post(upload::handler))
        .with_state(state)
}

/// JSON error body shared by every docs endpoint.
pub(crate) fn error_response(status: http::StatusCode, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
        .into_response()
}

/// Store failures map onto the API's three error classes.
pub(crate) fn store_error_response(err: &StoreError) -> Response {
    let status = match err {
        StoreError::Validation(_) => http::StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => http::StatusCode::NOT_FOUND,
        StoreError::Io(_, _) => http::StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err)
}
