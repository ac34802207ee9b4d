//! MySQL implementation of the `UserDirectory` trait.
//!
//! Read-only view over the `users` table; the session subsystem never
//! writes account rows.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bb_core::domain::entities::User;
use bb_core::errors::StoreError;
use bb_core::repositories::UserDirectory;

use super::store_err;

/// MySQL-backed user lookup.
pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = r#"
            SELECT id, email, is_active
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw_id: String = row.try_get("id").map_err(store_err)?;

        Ok(Some(User {
            id: Uuid::parse_str(&raw_id)
                .map_err(|e| StoreError::unavailable(format!("invalid user UUID: {}", e)))?,
            email: row.try_get("email").map_err(store_err)?,
            is_active: row.try_get("is_active").map_err(store_err)?,
        }))
    }
}
