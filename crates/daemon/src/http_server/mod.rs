//! HTTP surface of the daemon.
//!
//! Three route groups share one [`ServiceState`]: the JSON API under
//! `/api/v0/docs`, rendered document pages under `/view`, and status
//! probes under `/_status`. An optional static assets directory is
//! served as the fallback for everything else.

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ServiceState;

pub mod api;
pub mod health;
pub mod view;

/// Uploaded documents are text; anything past this is not a document.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn router(state: ServiceState, assets_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .nest("/api/v0/docs", api::v0::docs::router(state.clone()))
        .route("/view/*path", get(view::handler))
        .route("/_status/livez", get(health::liveness::handler))
        .route("/_status/version", get(health::version::handler))
        .with_state(state);

    if let Some(dir) = assets_dir {
        if dir.is_dir() {
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            tracing::warn!(dir = %dir.display(), "assets dir not found, skipping static file serving");
        }
    }

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
