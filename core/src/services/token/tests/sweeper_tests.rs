//! Unit tests for the cleanup sweeper.

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::repositories::{InMemoryTokenStore, RefreshTokenStore};
use crate::services::token::{SweeperConfig, TokenSweeper};

#[tokio::test]
async fn test_sweep_purges_only_dead_records() {
    let store = Arc::new(InMemoryTokenStore::new());

    let live = store.create(Uuid::new_v4()).await.unwrap();
    let revoked = store.create(Uuid::new_v4()).await.unwrap();
    store.revoke(&revoked).await.unwrap();

    let sweeper = TokenSweeper::new(store.clone(), SweeperConfig::default());

    let purged = sweeper.run_sweep().await.unwrap();
    assert_eq!(purged, 1);

    // The valid record survives any number of sweeps.
    assert_eq!(sweeper.run_sweep().await.unwrap(), 0);
    assert!(store.find_valid(&live).await.unwrap().is_some());
}

#[tokio::test]
async fn test_sweep_purges_expired_records() {
    let store = Arc::new(InMemoryTokenStore::new().with_ttl(Duration::milliseconds(-1)));
    store.create(Uuid::new_v4()).await.unwrap();
    store.create(Uuid::new_v4()).await.unwrap();

    let sweeper = TokenSweeper::new(store.clone(), SweeperConfig::default());

    assert_eq!(sweeper.run_sweep().await.unwrap(), 2);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_sweep_of_empty_store() {
    let store = Arc::new(InMemoryTokenStore::new());
    let sweeper = TokenSweeper::new(store, SweeperConfig::default());

    assert_eq!(sweeper.run_sweep().await.unwrap(), 0);
}
