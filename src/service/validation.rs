//! Request validation: typed body parsing, path ids and upload media types.

use crate::error::AppError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;
use uuid::Uuid;

/// Accepted upload content types: any image or video subtype.
pub const MEDIA_TYPE_PATTERN: &str = r"^(image|video)/[a-zA-Z]+";

static MEDIA_TYPE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

pub struct RequestValidator;

impl RequestValidator {
    /// Parse a JSON object body into `T`. Missing or mistyped fields are validation errors.
    pub fn parse<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
        if !body.is_object() {
            return Err(AppError::Validation("body must be a JSON object".into()));
        }
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Parse a path id as UUID.
    pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("id must be a valid UUID, got '{}'", raw)))
    }

    /// Reject content types other than image/* or video/*.
    pub fn validate_media_type(content_type: Option<&str>) -> Result<(), AppError> {
        let re = MEDIA_TYPE
            .get_or_init(|| Regex::new(MEDIA_TYPE_PATTERN))
            .as_ref()
            .map_err(|e| AppError::Internal(format!("invalid media type pattern: {}", e)))?;
        match content_type {
            Some(ct) if re.is_match(ct) => Ok(()),
            Some(ct) => Err(AppError::BadRequest(format!("unsupported file type: {}", ct))),
            None => Err(AppError::BadRequest("file has no content type".into())),
        }
    }
}
