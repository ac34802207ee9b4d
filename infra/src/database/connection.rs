//! Database connection pool management.
//!
//! Connection pooling uses SQLx with MySQL. The acquire timeout is the
//! I/O bound the rest of the subsystem relies on: a store call that
//! cannot obtain a connection in time surfaces an error instead of
//! hanging, and callers treat that as authentication failure
//! (fail-closed).

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::InfraError;

/// Database configuration settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    pub url: String,
    /// Maximum pool size
    pub max_connections: u32,
    /// Bound on acquiring a connection, in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://root@localhost/ballotbox".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

/// MySQL connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Creates a new connection pool.
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfraError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfraError::Config(format!("invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await?;

        Ok(Self { pool })
    }

    /// Clones the underlying pool handle.
    pub fn pool(&self) -> MySqlPool {
        self.pool.clone()
    }

    /// Verifies connectivity with a ping.
    pub async fn health_check(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
