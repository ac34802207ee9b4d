//! Read-only view of the external identity subsystem.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as consumed from the identity subsystem.
///
/// This core never mutates users. A user who becomes inactive is only
/// a signal to invalidate their refresh records lazily on next use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier owned by the identity subsystem
    pub id: Uuid,

    /// Email address, carried into access-credential claims
    pub email: String,

    /// Active/verified flag; inactive owners cannot redeem refresh tokens
    pub is_active: bool,
}

impl User {
    /// Creates an active user view.
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            is_active: true,
        }
    }
}

/// Identity resolved from a verified access credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User ID from the credential's subject claim
    pub user_id: Uuid,

    /// Email from the credential
    pub email: String,
}
