use crate::handlers::memories::{create_memory, delete_memory, list_memories, read_memory, update_memory};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Memory routes. Authentication is enforced per handler by the `AuthUser` extractor.
pub fn memories_routes(state: AppState) -> Router {
    Router::new()
        .route("/memories", get(list_memories).post(create_memory))
        .route(
            "/memories/:id",
            get(read_memory).put(update_memory).delete(delete_memory),
        )
        .with_state(state)
}
