//! Extract the authenticated user from `Authorization: Bearer <token>`.

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

const BEARER_PREFIX: &str = "Bearer ";

/// Verified caller. Rejects with 401 when the header is missing or the token is invalid.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Authorization header is not valid ASCII".into()))?;
        let token = bearer_token(header)
            .ok_or_else(|| AppError::Unauthorized("expected a Bearer token".into()))?;
        let claims = state.jwt.verify(token)?;
        let id = claims.user_id()?;
        Ok(AuthUser { id, claims })
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let prefix = header.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    header
        .get(BEARER_PREFIX.len()..)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
