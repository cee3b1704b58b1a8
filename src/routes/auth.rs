use crate::handlers::auth::register;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn auth_routes(state: AppState) -> Router {
    Router::new().route("/register", post(register)).with_state(state)
}
