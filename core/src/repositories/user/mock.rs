//! In-memory implementation of `UserDirectory` for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::StoreError;

use super::r#trait::UserDirectory;

/// In-memory user directory.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user view.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Flips a user's active flag, simulating deactivation by the
    /// identity subsystem.
    pub async fn set_active(&self, id: Uuid, is_active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = is_active;
        }
    }

    /// Whether the given user exists and is active.
    pub async fn is_active(&self, id: Uuid) -> Option<bool> {
        self.users.read().await.get(&id).map(|u| u.is_active)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
