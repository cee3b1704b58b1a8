//! Memory handlers. All require a bearer token; writes require ownership.

use crate::error::AppError;
use crate::extractors::AuthUser;
use crate::models::{Memory, MemoryInput, MemorySummary};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

async fn owned_memory(state: &AppState, user: &AuthUser, id: Uuid) -> Result<Memory, AppError> {
    let memory = state
        .memories
        .find_memory(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("memory {}", id)))?;
    if !memory.is_owned_by(user.id) {
        return Err(AppError::Unauthorized(format!("memory {} belongs to another user", id)));
    }
    Ok(memory)
}

/// GET /memories: the caller's memories as excerpts, oldest first.
#[utoipa::path(
    get,
    path = "/memories",
    tag = "Memories",
    security(("bearer" = [])),
    responses((status = 200, description = "OK", body = [MemorySummary]), (status = 401, description = "Missing or invalid token, or not the owner"))
)]
pub async fn list_memories(user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let memories = state.memories.list_memories(user.id).await?;
    let summaries: Vec<MemorySummary> = memories.iter().map(Memory::summary).collect();
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/memories/{id}",
    tag = "Memories",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Memory id (UUID)")),
    responses((status = 200, description = "OK", body = Memory), (status = 401, description = "Missing or invalid token, or not the owner"), (status = 404, description = "Not found"))
)]
pub async fn read_memory(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let memory = state
        .memories
        .find_memory(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("memory {}", id)))?;
    if !memory.is_visible_to(user.id) {
        return Err(AppError::Unauthorized(format!("memory {} is private", id)));
    }
    Ok(Json(memory))
}

#[utoipa::path(
    post,
    path = "/memories",
    tag = "Memories",
    security(("bearer" = [])),
    request_body = MemoryInput,
    responses((status = 201, description = "Created", body = Memory), (status = 401, description = "Missing or invalid token, or not the owner"), (status = 422, description = "Invalid id or body"))
)]
pub async fn create_memory(
    user: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let input: MemoryInput = RequestValidator::parse(body)?;
    let memory = state.memories.create_memory(user.id, &input).await?;
    tracing::info!(memory_id = %memory.id, user_id = %user.id, user = %user.claims.name, "memory created");
    Ok((StatusCode::CREATED, Json(memory)))
}

#[utoipa::path(
    put,
    path = "/memories/{id}",
    tag = "Memories",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Memory id (UUID)")),
    request_body = MemoryInput,
    responses((status = 200, description = "OK", body = Memory), (status = 401, description = "Missing or invalid token, or not the owner"), (status = 404, description = "Not found"), (status = 422, description = "Invalid id or body"))
)]
pub async fn update_memory(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let Json(body) = body?;
    let input: MemoryInput = RequestValidator::parse(body)?;
    owned_memory(&state, &user, id).await?;
    let memory = state
        .memories
        .update_memory(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("memory {}", id)))?;
    Ok(Json(memory))
}

#[utoipa::path(
    delete,
    path = "/memories/{id}",
    tag = "Memories",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Memory id (UUID)")),
    responses((status = 204, description = "Deleted"), (status = 401, description = "Missing or invalid token, or not the owner"), (status = 404, description = "Not found"))
)]
pub async fn delete_memory(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    owned_memory(&state, &user, id).await?;
    state.memories.delete_memory(id).await?;
    tracing::info!(memory_id = %id, user_id = %user.id, user = %user.claims.name, "memory deleted");
    Ok(StatusCode::NO_CONTENT)
}
