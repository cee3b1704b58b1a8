//! Request validation and upload storage.

mod upload;
mod validation;
pub use upload::{UploadStore, MAX_UPLOAD_BYTES, UPLOADS_PREFIX};
pub use validation::{RequestValidator, MEDIA_TYPE_PATTERN};
