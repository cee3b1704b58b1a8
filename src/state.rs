//! Shared application state for all routes.

use crate::auth::{IdentityProvider, JwtKeys};
use crate::service::UploadStore;
use crate::store::{MemoryRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub memories: Arc<dyn MemoryRepository>,
    pub jwt: Arc<JwtKeys>,
    /// `None` when no OAuth client is configured; `/register` then fails.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    pub uploads: Arc<UploadStore>,
    /// Fixed base for returned file URLs; derived from request headers when unset.
    pub public_url: Option<String>,
}

impl AppState {
    /// State over one store serving both users and memories.
    pub fn new<S>(store: Arc<S>, jwt: JwtKeys, uploads: UploadStore) -> Self
    where
        S: UserRepository + MemoryRepository + 'static,
    {
        AppState {
            users: store.clone(),
            memories: store,
            jwt: Arc::new(jwt),
            identity: None,
            uploads: Arc::new(uploads),
            public_url: None,
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_public_url(mut self, public_url: Option<String>) -> Self {
        self.public_url = public_url;
        self
    }
}
