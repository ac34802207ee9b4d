//! Refresh token store trait defining the interface for refresh
//! record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshRecord;
use crate::errors::StoreError;

/// Persistence contract for refresh records.
///
/// The store is the only shared mutable resource in the subsystem.
/// Implementations must make [`claim`](RefreshTokenStore::claim)
/// atomic with respect to concurrent callers: for a given token value,
/// exactly one claim succeeds. Every method takes the raw opaque token;
/// implementations hash it for lookup so that raw values never reach
/// storage.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Generates a fresh opaque token for `user_id`, persists its
    /// record with the store's refresh window, and returns the raw
    /// token string.
    async fn create(&self, user_id: Uuid) -> Result<String, StoreError>;

    /// Looks up a record by raw token value.
    ///
    /// Returns `None` when the token is unknown, revoked, expired, or
    /// its owner is no longer active. In the owner-inactive case the
    /// record is revoked as a side effect before `None` is returned
    /// (lazy invalidation).
    async fn find_valid(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError>;

    /// Atomically claims a record: flips `revoked` from `false` to
    /// `true` iff the record is unrevoked and unexpired, returning the
    /// claimed record. Two concurrent claims on the same token yield
    /// exactly one `Some`; the loser sees `None`.
    async fn claim(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError>;

    /// Revokes the record matching `token`. Idempotent; a missing
    /// token is a no-op, never an error.
    async fn revoke(&self, token: &str) -> Result<(), StoreError>;

    /// Revokes every non-revoked record owned by `user_id`, returning
    /// how many were flipped. Idempotent.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, StoreError>;

    /// Deletes every record that is revoked or expired as of `now`,
    /// returning the number removed. Never touches a currently-valid
    /// record.
    async fn purge_dead(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}
