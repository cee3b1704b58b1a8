//! User CRUD handlers: list, read, create, replace, delete.

use crate::error::AppError;
use crate::models::{User, UserInput};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// GET /users: all users ordered by name.
#[utoipa::path(get, path = "/users", tag = "Users", responses((status = 200, description = "OK", body = [User])))]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses((status = 200, description = "OK", body = User), (status = 404, description = "Not found"), (status = 422, description = "Invalid id or body"))
)]
pub async fn read_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let user = state
        .users
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserInput,
    responses((status = 201, description = "Created", body = User), (status = 409, description = "Duplicate githubId"), (status = 422, description = "Invalid id or body"))
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let input: UserInput = RequestValidator::parse(body)?;
    let user = state.users.create_user(&input).await?;
    tracing::info!(user_id = %user.id, github_id = user.github_id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (UUID)")),
    request_body = UserInput,
    responses((status = 200, description = "OK", body = User), (status = 404, description = "Not found"), (status = 422, description = "Invalid id or body"))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    let Json(body) = body?;
    let input: UserInput = RequestValidator::parse(body)?;
    let user = state
        .users
        .update_user(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"), (status = 422, description = "Invalid id or body"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = RequestValidator::parse_id(&id_str)?;
    state
        .users
        .delete_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
