//! Upload route with a body limit sized for one maximum file plus multipart framing.

use crate::handlers::upload::upload;
use crate::service::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn upload_routes(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES))
        .with_state(state)
}
