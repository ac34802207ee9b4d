//! Unit tests for the signed-token codec.

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::token::{AccessTokenCodec, TokenServiceConfig};

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::default()
}

#[test]
fn test_mint_verify_round_trip() {
    let codec = AccessTokenCodec::new(&test_config());
    let user_id = Uuid::new_v4();

    let token = codec.mint(user_id, "voter@example.com").unwrap();
    let claims = codec.verify(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.email, "voter@example.com");
    assert_eq!(claims.iss, test_config().issuer);
    assert_eq!(claims.aud, test_config().audience);
    assert!(!claims.is_expired());
}

#[test]
fn test_verify_rejects_tampered_signature() {
    let codec = AccessTokenCodec::new(&test_config());

    let other_config = TokenServiceConfig {
        jwt_secret: "a-completely-different-secret-of-decent-length".to_string(),
        ..test_config()
    };
    let other_codec = AccessTokenCodec::new(&other_config);

    let token = other_codec.mint(Uuid::new_v4(), "voter@example.com").unwrap();

    assert_eq!(codec.verify(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_verify_rejects_expired_token() {
    let codec = AccessTokenCodec::new(&test_config());
    let config = test_config();

    let mut claims = Claims::new_access_token(
        Uuid::new_v4(),
        "voter@example.com",
        Duration::minutes(15),
        &config.issuer,
        &config.audience,
    );
    claims.exp = claims.iat - 60;
    claims.nbf = claims.iat - 120;

    let token = codec.encode(&claims).unwrap();

    assert_eq!(codec.verify(&token), Err(TokenError::Expired));
}

#[test]
fn test_verify_rejects_issuer_mismatch() {
    // Same key, different issuer expectation.
    let minting_config = TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..test_config()
    };
    let minting_codec = AccessTokenCodec::new(&minting_config);
    let verifying_codec = AccessTokenCodec::new(&test_config());

    let token = minting_codec
        .mint(Uuid::new_v4(), "voter@example.com")
        .unwrap();

    assert_eq!(
        verifying_codec.verify(&token),
        Err(TokenError::ClaimsMismatch)
    );
}

#[test]
fn test_verify_rejects_audience_mismatch() {
    let minting_config = TokenServiceConfig {
        audience: "another-api".to_string(),
        ..test_config()
    };
    let minting_codec = AccessTokenCodec::new(&minting_config);
    let verifying_codec = AccessTokenCodec::new(&test_config());

    let token = minting_codec
        .mint(Uuid::new_v4(), "voter@example.com")
        .unwrap();

    assert_eq!(
        verifying_codec.verify(&token),
        Err(TokenError::ClaimsMismatch)
    );
}

#[test]
fn test_verify_rejects_garbage() {
    let codec = AccessTokenCodec::new(&test_config());

    assert_eq!(codec.verify("not-a-jwt"), Err(TokenError::Malformed));
    assert_eq!(codec.verify(""), Err(TokenError::Malformed));
}
