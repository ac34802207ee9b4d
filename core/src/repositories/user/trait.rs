//! User directory trait: read-only access to the external identity
//! subsystem.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::StoreError;

/// Read-only lookup into the identity subsystem.
///
/// This core consumes `id`, `email` and `is_active` and never writes
/// back; user registration, profiles and password handling live
/// elsewhere.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by their stable identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}
