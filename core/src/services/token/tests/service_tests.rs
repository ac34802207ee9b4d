//! Unit tests for the token service.

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::AuthError;
use crate::repositories::{InMemoryTokenStore, InMemoryUserDirectory};
use crate::services::token::{TokenService, TokenServiceConfig};

struct Fixture {
    service: TokenService<InMemoryTokenStore, InMemoryUserDirectory>,
    store: InMemoryTokenStore,
    users: InMemoryUserDirectory,
}

fn fixture() -> Fixture {
    let store = InMemoryTokenStore::new();
    let users = InMemoryUserDirectory::new();
    let service = TokenService::new(
        store.clone(),
        users.clone(),
        TokenServiceConfig::default(),
    )
    .expect("service construction");

    Fixture {
        service,
        store,
        users,
    }
}

async fn active_user(fx: &Fixture) -> User {
    let user = User::new(Uuid::new_v4(), "voter@example.com");
    fx.users.insert(user.clone()).await;
    user
}

#[test]
fn test_new_rejects_short_secret() {
    let config = TokenServiceConfig {
        jwt_secret: "short".to_string(),
        ..TokenServiceConfig::default()
    };

    let result = TokenService::new(
        InMemoryTokenStore::new(),
        InMemoryUserDirectory::new(),
        config,
    );

    assert!(matches!(result, Err(AuthError::Configuration { .. })));
}

#[test]
fn test_new_rejects_refresh_window_not_exceeding_access_window() {
    let config = TokenServiceConfig {
        access_token_ttl_minutes: 8 * 24 * 60,
        refresh_token_ttl_days: 7,
        ..TokenServiceConfig::default()
    };

    let result = TokenService::new(
        InMemoryTokenStore::new(),
        InMemoryUserDirectory::new(),
        config,
    );

    assert!(matches!(result, Err(AuthError::Configuration { .. })));
}

#[tokio::test]
async fn test_issue_pair_then_authenticate() {
    let fx = fixture();
    let user = active_user(&fx).await;

    let pair = fx.service.issue_pair(&user).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);

    let identity = fx.service.authenticate(&pair.access_token).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, user.email);
}

#[tokio::test]
async fn test_authenticate_rejects_expired_credential() {
    let fx = fixture();
    let config = TokenServiceConfig::default();

    let mut claims = Claims::new_access_token(
        Uuid::new_v4(),
        "voter@example.com",
        Duration::minutes(15),
        &config.issuer,
        &config.audience,
    );
    claims.exp = claims.iat - 1;
    claims.nbf = claims.iat - 60;

    let token = fx.service.codec().encode(&claims).unwrap();

    assert!(matches!(
        fx.service.authenticate(&token),
        Err(AuthError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_authenticate_rejects_garbage() {
    let fx = fixture();
    assert!(matches!(
        fx.service.authenticate("bearer-of-bad-news"),
        Err(AuthError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_rotation_chain_with_replays_failing() {
    let fx = fixture();
    let user = active_user(&fx).await;

    // Login yields (A1, R1).
    let pair1 = fx.service.issue_pair(&user).await.unwrap();

    // rotate(R1) -> (A2, R2).
    let pair2 = fx.service.rotate(&pair1.refresh_token).await.unwrap();
    assert_ne!(pair2.refresh_token, pair1.refresh_token);

    // Replaying R1 fails: a refresh token is redeemable at most once.
    assert!(matches!(
        fx.service.rotate(&pair1.refresh_token).await,
        Err(AuthError::InvalidRefreshToken)
    ));

    // rotate(R2) -> (A3, R3) still works.
    let pair3 = fx.service.rotate(&pair2.refresh_token).await.unwrap();
    assert_ne!(pair3.refresh_token, pair2.refresh_token);

    let identity = fx.service.authenticate(&pair3.access_token).unwrap();
    assert_eq!(identity.user_id, user.id);
}

#[tokio::test]
async fn test_rotate_never_issued_token() {
    let fx = fixture();
    assert!(matches!(
        fx.service.rotate("deadbeef").await,
        Err(AuthError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn test_logout_then_rotate_fails() {
    let fx = fixture();
    let user = active_user(&fx).await;

    let pair = fx.service.issue_pair(&user).await.unwrap();

    fx.service.logout(&pair.refresh_token).await.unwrap();

    assert!(matches!(
        fx.service.rotate(&pair.refresh_token).await,
        Err(AuthError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn test_logout_unknown_token_succeeds() {
    let fx = fixture();
    // Logout is not an information-disclosure channel.
    fx.service.logout("never-issued").await.unwrap();
}

#[tokio::test]
async fn test_logout_all_scoped_to_user() {
    let fx = fixture();
    let alice = active_user(&fx).await;
    let bob = User::new(Uuid::new_v4(), "other@example.com");
    fx.users.insert(bob.clone()).await;

    let alice_pair1 = fx.service.issue_pair(&alice).await.unwrap();
    let alice_pair2 = fx.service.issue_pair(&alice).await.unwrap();
    let bob_pair = fx.service.issue_pair(&bob).await.unwrap();

    let ended = fx.service.logout_all(alice.id).await.unwrap();
    assert_eq!(ended, 2);

    assert!(matches!(
        fx.service.rotate(&alice_pair1.refresh_token).await,
        Err(AuthError::InvalidRefreshToken)
    ));
    assert!(matches!(
        fx.service.rotate(&alice_pair2.refresh_token).await,
        Err(AuthError::InvalidRefreshToken)
    ));

    // Bob's session is untouched.
    assert!(fx.service.rotate(&bob_pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_rotate_after_owner_deactivated() {
    let fx = fixture();
    let user = active_user(&fx).await;

    let pair = fx.service.issue_pair(&user).await.unwrap();

    fx.users.set_active(user.id, false).await;

    assert!(matches!(
        fx.service.rotate(&pair.refresh_token).await,
        Err(AuthError::InvalidRefreshToken)
    ));

    // The record ends up revoked, not merely unusable.
    let record = fx.store.peek(&pair.refresh_token).await.unwrap();
    assert!(record.revoked);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rotation_single_winner() {
    let fx = fixture();
    let user = active_user(&fx).await;

    let pair = fx.service.issue_pair(&user).await.unwrap();
    let service = Arc::new(fx.service);
    let stolen = pair.refresh_token.clone();

    let a = {
        let service = Arc::clone(&service);
        let token = stolen.clone();
        tokio::spawn(async move { service.rotate(&token).await })
    };
    let b = {
        let service = Arc::clone(&service);
        let token = stolen.clone();
        tokio::spawn(async move { service.rotate(&token).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(AuthError::InvalidRefreshToken)))
        .count();

    // Exactly one winner and one InvalidRefreshToken, never two pairs.
    assert_eq!(winners, 1);
    assert_eq!(losers, 1);
}
