use crate::handlers::users::{create_user, delete_user, list_users, read_user, update_user};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn users_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(read_user).put(update_user).delete(delete_user))
        .with_state(state)
}
