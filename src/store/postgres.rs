//! PostgreSQL repositories over a shared pool.

use super::{MemoryRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Memory, MemoryInput, User, UserInput};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, github_id, name, login, avatar_url";
const MEMORY_COLUMNS: &str = "id, user_id, cover_url, content, is_public, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY name ASC", USER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user_by_github_id(&self, github_id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE github_id = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, github_id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(github_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_user(&self, input: &UserInput) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS, USER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.github_id)
            .bind(&input.name)
            .bind(&input.login)
            .bind(&input.avatar_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "user"))
    }

    async fn update_user(&self, id: Uuid, input: &UserInput) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET github_id = $2, name = $3, login = $4, avatar_url = $5 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.github_id)
            .bind(&input.name)
            .bind(&input.login)
            .bind(&input.avatar_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "user"))
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {}", USER_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MemoryRepository for PgStore {
    async fn list_memories(&self, user_id: Uuid) -> Result<Vec<Memory>, AppError> {
        let sql = format!(
            "SELECT {} FROM memories WHERE user_id = $1 ORDER BY created_at ASC",
            MEMORY_COLUMNS
        );
        tracing::debug!(sql = %sql, %user_id, "query");
        let rows = sqlx::query_as::<_, Memory>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError> {
        let sql = format!("SELECT {} FROM memories WHERE id = $1", MEMORY_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Memory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_memory(&self, user_id: Uuid, input: &MemoryInput) -> Result<Memory, AppError> {
        let sql = format!(
            "INSERT INTO memories (id, user_id, cover_url, content, is_public) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            MEMORY_COLUMNS
        );
        tracing::debug!(sql = %sql, %user_id, "query");
        sqlx::query_as::<_, Memory>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&input.cover_url)
            .bind(&input.content)
            .bind(input.is_public)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "memory"))
    }

    async fn update_memory(&self, id: Uuid, input: &MemoryInput) -> Result<Option<Memory>, AppError> {
        let sql = format!(
            "UPDATE memories SET cover_url = $2, content = $3, is_public = $4 WHERE id = $1 RETURNING {}",
            MEMORY_COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Memory>(&sql)
            .bind(id)
            .bind(&input.cover_url)
            .bind(&input.content)
            .bind(input.is_public)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError> {
        let sql = format!("DELETE FROM memories WHERE id = $1 RETURNING {}", MEMORY_COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Memory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
