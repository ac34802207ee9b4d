//! In-memory implementation of `RefreshTokenStore` for testing.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{hash_token, RefreshRecord, REFRESH_TOKEN_TTL_DAYS};
use crate::errors::StoreError;
use crate::repositories::user::InMemoryUserDirectory;

use super::r#trait::RefreshTokenStore;

/// In-memory refresh token store keyed by token hash.
///
/// `claim` holds the write lock across check and set, giving the same
/// single-winner guarantee the SQL implementation gets from its
/// conditional UPDATE. Optionally shares a user directory so
/// `find_valid` can apply the owner-activity rule.
#[derive(Clone)]
pub struct InMemoryTokenStore {
    records: Arc<RwLock<HashMap<String, RefreshRecord>>>,
    users: Option<Arc<InMemoryUserDirectory>>,
    refresh_ttl: Duration,
}

impl InMemoryTokenStore {
    /// Creates a store with the default refresh window and no owner
    /// checking.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            users: None,
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Attaches a user directory used for the owner-activity rule in
    /// `find_valid`.
    pub fn with_users(mut self, users: Arc<InMemoryUserDirectory>) -> Self {
        self.users = Some(users);
        self
    }

    /// Overrides the refresh window.
    pub fn with_ttl(mut self, refresh_ttl: Duration) -> Self {
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Returns the raw record for a token regardless of validity.
    /// Test-side inspection only.
    pub async fn peek(&self, token: &str) -> Option<RefreshRecord> {
        let records = self.records.read().await;
        records.get(&hash_token(token)).cloned()
    }

    /// Number of records currently held, dead or alive.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn owner_is_active(&self, user_id: Uuid) -> bool {
        match &self.users {
            Some(users) => users.is_active(user_id).await.unwrap_or(false),
            // No directory attached: owner checking is out of play.
            None => true,
        }
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryTokenStore {
    async fn create(&self, user_id: Uuid) -> Result<String, StoreError> {
        let (raw, record) = RefreshRecord::issue(user_id, self.refresh_ttl);
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(StoreError::unavailable("duplicate token hash"));
        }

        records.insert(record.token_hash.clone(), record);
        Ok(raw)
    }

    async fn find_valid(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError> {
        let hash = hash_token(token);

        let record = {
            let records = self.records.read().await;
            match records.get(&hash) {
                Some(record) if record.is_valid() => record.clone(),
                _ => return Ok(None),
            }
        };

        if !self.owner_is_active(record.user_id).await {
            // Lazy invalidation: the owner went inactive since issuance.
            let mut records = self.records.write().await;
            if let Some(record) = records.get_mut(&hash) {
                record.revoke();
            }
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn claim(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError> {
        let hash = hash_token(token);
        let mut records = self.records.write().await;

        match records.get_mut(&hash) {
            Some(record) if record.is_valid() => {
                record.revoke();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&hash_token(token)) {
            record.revoke();
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, StoreError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.revoked {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn purge_dead(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, record| !record.revoked && record.expires_at >= now);

        Ok((before - records.len()) as u64)
    }
}
