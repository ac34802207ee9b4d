//! MySQL implementation of the `RefreshTokenStore` trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE refresh_tokens (
//!     id         CHAR(36)     NOT NULL PRIMARY KEY,
//!     user_id    CHAR(36)     NOT NULL,
//!     token_hash CHAR(64)     NOT NULL,
//!     created_at TIMESTAMP(6) NOT NULL,
//!     expires_at TIMESTAMP(6) NOT NULL,
//!     revoked    BOOLEAN      NOT NULL DEFAULT FALSE,
//!     UNIQUE KEY uk_refresh_tokens_token_hash (token_hash),
//!     KEY idx_refresh_tokens_user_id (user_id)
//! );
//! ```
//!
//! Only token hashes are stored; raw opaque tokens never reach the
//! database.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bb_core::domain::entities::token::{hash_token, RefreshRecord};
use bb_core::errors::StoreError;
use bb_core::repositories::RefreshTokenStore;

use super::store_err;

/// MySQL-backed refresh token store.
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
    refresh_ttl: Duration,
}

impl MySqlRefreshTokenStore {
    /// Creates a store over the given pool with the given refresh
    /// window.
    pub fn new(pool: MySqlPool, refresh_ttl: Duration) -> Self {
        Self { pool, refresh_ttl }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshRecord, StoreError> {
        let id: String = row.try_get("id").map_err(store_err)?;
        let user_id: String = row.try_get("user_id").map_err(store_err)?;

        Ok(RefreshRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| StoreError::unavailable(format!("invalid record UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| StoreError::unavailable(format!("invalid user UUID: {}", e)))?,
            token_hash: row.try_get("token_hash").map_err(store_err)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(store_err)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(store_err)?,
            revoked: row.try_get("revoked").map_err(store_err)?,
        })
    }

    async fn revoke_hash(&self, token_hash: &str) -> Result<(), StoreError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token_hash = ? AND revoked = FALSE
        "#;

        sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn create(&self, user_id: Uuid) -> Result<String, StoreError> {
        let (raw, record) = RefreshRecord::issue(user_id, self.refresh_ttl);

        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, created_at, expires_at, revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.revoked)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(raw)
    }

    async fn find_valid(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError> {
        let token_hash = hash_token(token);

        let query = r#"
            SELECT rt.id, rt.user_id, rt.token_hash, rt.created_at, rt.expires_at, rt.revoked,
                   u.is_active
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(&token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = Self::row_to_record(&row)?;
        if record.revoked || record.expires_at <= Utc::now() {
            return Ok(None);
        }

        let is_active: bool = row.try_get("is_active").map_err(store_err)?;
        if !is_active {
            // Lazy invalidation: the owner was deactivated after
            // issuance, so the record is revoked on this lookup.
            self.revoke_hash(&token_hash).await?;
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn claim(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError> {
        let token_hash = hash_token(token);

        // Single conditional UPDATE: of two claims racing on the same
        // token, the storage engine lets exactly one match the
        // revoked = FALSE predicate. The rows-affected count tells the
        // loser apart from the winner.
        let update = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token_hash = ? AND revoked = FALSE AND expires_at > ?
        "#;

        let result = sqlx::query(update)
            .bind(&token_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let select = r#"
            SELECT id, user_id, token_hash, created_at, expires_at, revoked
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(select)
            .bind(&token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(Some(Self::row_to_record(&row)?))
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        self.revoke_hash(&hash_token(token)).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, StoreError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = ? AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected() as usize)
    }

    async fn purge_dead(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE revoked = TRUE OR expires_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected())
    }
}
