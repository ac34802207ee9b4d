//! Background sweeper that reclaims dead refresh records.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::StoreError;
use crate::repositories::RefreshTokenStore;

/// Configuration for the cleanup sweeper.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Seconds between sweeps
    pub interval_seconds: u64,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 86_400, // daily
            enabled: true,
        }
    }
}

/// Periodically purges revoked and expired refresh records.
///
/// Deletion is storage reclamation only: a record is already unusable
/// the moment it is revoked or expired, so a missed or failed sweep
/// has no correctness impact and never blocks issuance or rotation.
pub struct TokenSweeper<R: RefreshTokenStore + 'static> {
    store: Arc<R>,
    config: SweeperConfig,
}

impl<R: RefreshTokenStore> TokenSweeper<R> {
    /// Creates a sweeper over the given store.
    pub fn new(store: Arc<R>, config: SweeperConfig) -> Self {
        Self { store, config }
    }

    /// Runs a single sweep, returning the number of records purged.
    pub async fn run_sweep(&self) -> Result<u64, StoreError> {
        let purged = self.store.purge_dead(Utc::now()).await?;
        if purged > 0 {
            info!(purged, "purged dead refresh records");
        }
        Ok(purged)
    }

    /// Spawns the sweeper as a background task.
    ///
    /// A failed sweep is logged and retried on the next scheduled
    /// tick.
    pub fn spawn(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("token sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "token sweeper started"
            );

            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!(error = %e, "sweep failed; retrying on next tick");
                }
            }
        });
    }
}
