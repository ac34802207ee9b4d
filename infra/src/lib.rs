//! # Ballotbox Infrastructure
//!
//! MySQL implementations of the core store traits plus connection-pool
//! management. All I/O is bounded by the pool's acquire timeout; a
//! store that cannot answer in time fails closed.

pub mod database;

pub use database::connection::{DatabaseConfig, DatabasePool};
pub use database::mysql::{MySqlRefreshTokenStore, MySqlUserDirectory};

use thiserror::Error;

/// Infrastructure-level failures.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
