//! POST /register: exchange an OAuth code, find or create the user, issue a JWT.

use crate::error::{AppError, ConfigError};
use crate::models::UserInput;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// OAuth authorization code returned to the client by GitHub.
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Signed session token", body = RegisterResponse),
        (status = 422, description = "Missing code"),
        (status = 502, description = "Identity provider failed")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let RegisterRequest { code } = RequestValidator::parse(body)?;
    let identity = state
        .identity
        .as_ref()
        .ok_or(AppError::Config(ConfigError::Missing("GITHUB_CLIENT_ID")))?;
    let profile = identity.exchange_code(&code).await?;

    let user = match state.users.find_user_by_github_id(profile.id).await? {
        Some(user) => user,
        None => {
            let input = UserInput {
                github_id: profile.id,
                name: profile.name,
                login: profile.login,
                avatar_url: profile.avatar_url,
            };
            let user = state.users.create_user(&input).await?;
            tracing::info!(user_id = %user.id, github_id = user.github_id, "registered new user");
            user
        }
    };

    let token = state.jwt.issue(&user)?;
    Ok(Json(RegisterResponse { token }))
}
