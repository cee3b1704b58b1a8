//! Storage: repository traits, database bootstrap and the PostgreSQL implementation.

mod postgres;
#[cfg(test)]
pub(crate) mod in_memory;

pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Memory, MemoryInput, User, UserInput};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

/// User persistence. Each method is a single storage call.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by name ascending.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_github_id(&self, github_id: i64) -> Result<Option<User>, AppError>;
    async fn create_user(&self, input: &UserInput) -> Result<User, AppError>;
    /// Replace all mutable fields. `None` when no row has `id`.
    async fn update_user(&self, id: Uuid, input: &UserInput) -> Result<Option<User>, AppError>;
    /// Delete by id, returning the removed row.
    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    /// Round-trip to the backing store, used by readiness.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Memory persistence.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Memories owned by `user_id`, oldest first.
    async fn list_memories(&self, user_id: Uuid) -> Result<Vec<Memory>, AppError>;
    async fn find_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError>;
    async fn create_memory(&self, user_id: Uuid, input: &MemoryInput) -> Result<Memory, AppError>;
    async fn update_memory(&self, id: Uuid, input: &MemoryInput) -> Result<Option<Memory>, AppError>;
    async fn delete_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError>;
}

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        github_id BIGINT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        login TEXT NOT NULL,
        avatar_url TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS memories (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        cover_url TEXT NOT NULL,
        content TEXT NOT NULL,
        is_public BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS memories_user_id_created_at_idx ON memories (user_id, created_at)",
];

/// Create the `users` and `memories` tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = TABLES_DDL.len(), "schema ensured");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database when missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin_url, db_name)) = parse_db_name_from_url(database_url)? else {
        return Ok(());
    };
    if db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split a URL into the maintenance URL (same authority and query, database `postgres`)
/// and the target database name. `None` when the URL names no database.
fn parse_db_name_from_url(url: &str) -> Result<Option<(String, String)>, AppError> {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let authority_start = base
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: missing scheme".into()))?;
    let rest = base.get(authority_start..).unwrap_or("");
    let Some(slash) = rest.find('/') else {
        return Ok(None);
    };
    let path_start = authority_start + slash + 1;
    let db_name = base.get(path_start..).unwrap_or("").trim();
    if db_name.is_empty() {
        return Ok(None);
    }
    let prefix = base.get(..path_start).unwrap_or(base);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", prefix, q),
        None => format!("{}postgres", prefix),
    };
    Ok(Some((admin_url, db_name.to_string())))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
