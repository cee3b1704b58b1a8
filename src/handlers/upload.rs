//! POST /upload: store one image or video from a multipart body and return its public URL.

use crate::error::AppError;
use crate::service::{RequestValidator, UploadStore, MAX_UPLOAD_BYTES};
use crate::state::AppState;
use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_url: String,
}

/// Multipart form accepted by `/upload`.
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("upload exceeds {} bytes", MAX_UPLOAD_BYTES))
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Scheme and authority the client used, honouring a proxy's `X-Forwarded-Proto`.
fn request_base_url(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing Host header".into()))?;
    let proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| *p == "http" || *p == "https")
        .unwrap_or("http");
    Ok(format!("{}://{}", proto, host))
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data", description = "One image/* or video/* file, at most 5 MiB"),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "Missing or unsupported file"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.file_name().is_none() {
            continue;
        }
        RequestValidator::validate_media_type(field.content_type())?;
        let file_name = UploadStore::stored_file_name(field.file_name());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::PayloadTooLarge(format!(
                    "upload exceeds {} bytes",
                    MAX_UPLOAD_BYTES
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        state.uploads.save(&file_name, &bytes).await?;
        let base = match &state.public_url {
            Some(url) => url.clone(),
            None => request_base_url(&headers)?,
        };
        return Ok(Json(UploadResponse {
            file_url: UploadStore::file_url(&base, &file_name),
        }));
    }
    Err(AppError::BadRequest("multipart body has no file field".into()))
}
