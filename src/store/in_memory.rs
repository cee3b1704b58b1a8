//! Map-backed repositories for router tests.

use super::{MemoryRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Memory, MemoryInput, User, UserInput};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    memories: Mutex<Vec<Memory>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("store lock poisoned".into())
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.lock().map_err(poisoned)?;
        let mut out: Vec<User> = users.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_user_by_github_id(&self, github_id: i64) -> Result<Option<User>, AppError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.values().find(|u| u.github_id == github_id).cloned())
    }

    async fn create_user(&self, input: &UserInput) -> Result<User, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.values().any(|u| u.github_id == input.github_id) {
            return Err(AppError::Conflict("user already exists".into()));
        }
        let user = User::from_input(Uuid::new_v4(), input.clone());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: &UserInput) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.values().any(|u| u.id != id && u.github_id == input.github_id) {
            return Err(AppError::Conflict("user already exists".into()));
        }
        Ok(users.get_mut(&id).map(|u| {
            *u = User::from_input(id, input.clone());
            u.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let removed = self.users.lock().map_err(poisoned)?.remove(&id);
        if removed.is_some() {
            self.memories.lock().map_err(poisoned)?.retain(|m| m.user_id != id);
        }
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl MemoryRepository for InMemoryStore {
    async fn list_memories(&self, user_id: Uuid) -> Result<Vec<Memory>, AppError> {
        let memories = self.memories.lock().map_err(poisoned)?;
        let mut out: Vec<Memory> = memories.iter().filter(|m| m.user_id == user_id).cloned().collect();
        out.sort_by_key(|m| m.created_at);
        Ok(out)
    }

    async fn find_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError> {
        let memories = self.memories.lock().map_err(poisoned)?;
        Ok(memories.iter().find(|m| m.id == id).cloned())
    }

    async fn create_memory(&self, user_id: Uuid, input: &MemoryInput) -> Result<Memory, AppError> {
        if !self.users.lock().map_err(poisoned)?.contains_key(&user_id) {
            return Err(AppError::NotFound("memory references a missing record".into()));
        }
        let mut memories = self.memories.lock().map_err(poisoned)?;
        // Strictly increasing timestamps keep creation order observable in fast tests.
        let created_at = memories
            .last()
            .map(|m| m.created_at + Duration::milliseconds(1))
            .unwrap_or_else(Utc::now);
        let memory = Memory {
            id: Uuid::new_v4(),
            user_id,
            cover_url: input.cover_url.clone(),
            content: input.content.clone(),
            is_public: input.is_public,
            created_at,
        };
        memories.push(memory.clone());
        Ok(memory)
    }

    async fn update_memory(&self, id: Uuid, input: &MemoryInput) -> Result<Option<Memory>, AppError> {
        let mut memories = self.memories.lock().map_err(poisoned)?;
        Ok(memories.iter_mut().find(|m| m.id == id).map(|m| {
            m.cover_url = input.cover_url.clone();
            m.content = input.content.clone();
            m.is_public = input.is_public;
            m.clone()
        }))
    }

    async fn delete_memory(&self, id: Uuid) -> Result<Option<Memory>, AppError> {
        let mut memories = self.memories.lock().map_err(poisoned)?;
        let pos = memories.iter().position(|m| m.id == id);
        Ok(pos.map(|i| memories.remove(i)))
    }
}
