//! Route groups and the assembled application router.

mod auth;
mod common;
mod memories;
mod upload;
mod users;

pub use auth::auth_routes;
pub use common::common_routes;
pub use memories::memories_routes;
pub use upload::upload_routes;
pub use users::users_routes;

use crate::service::UPLOADS_PREFIX;
use crate::state::AppState;
use axum::http::Method;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// CORS policy reflecting the caller's origin and requested headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Full application: every route group, static uploads, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let uploads_dir = state.uploads.dir().to_path_buf();
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(upload_routes(state.clone()))
        .merge(users_routes(state.clone()))
        .merge(memories_routes(state))
        .nest_service(UPLOADS_PREFIX, ServeDir::new(uploads_dir))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
