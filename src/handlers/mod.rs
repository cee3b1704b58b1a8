//! HTTP handlers for users, memories, registration and uploads.

pub mod auth;
pub mod memories;
pub mod upload;
pub mod users;
