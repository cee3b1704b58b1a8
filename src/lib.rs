//! memories-api: users, memories and uploads over PostgreSQL.

pub mod auth;
pub mod config;
pub mod doc;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use auth::{GithubOAuth, IdentityProvider, JwtKeys};
pub use config::{from_env, Settings};
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use service::UploadStore;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, MemoryRepository, PgStore, UserRepository};
