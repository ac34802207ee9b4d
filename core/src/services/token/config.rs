//! Configuration for the token service.

use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{
    ACCESS_TOKEN_TTL_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_TTL_DAYS,
};
use crate::errors::AuthError;

/// Minimum acceptable signing-secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token service.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer claim minted into and required of access credentials
    pub issuer: String,
    /// Audience claim minted into and required of access credentials
    pub audience: String,
    /// Access credential lifetime in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_ttl_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_ttl_minutes: ACCESS_TOKEN_TTL_MINUTES,
            refresh_token_ttl_days: REFRESH_TOKEN_TTL_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Checks the startup invariants. Runs once at service
    /// construction, before any credential is issued.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::Configuration {
                message: format!("jwt secret must be at least {} bytes", MIN_SECRET_BYTES),
            });
        }

        if self.access_token_ttl_minutes <= 0 || self.refresh_token_ttl_days <= 0 {
            return Err(AuthError::Configuration {
                message: "token lifetimes must be positive".to_string(),
            });
        }

        // A refresh window no longer than the access window would make
        // rotation pointless.
        if self.refresh_ttl() <= self.access_ttl() {
            return Err(AuthError::Configuration {
                message: "refresh token lifetime must exceed access token lifetime".to_string(),
            });
        }

        Ok(())
    }

    /// Access credential lifetime as a duration.
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_ttl_minutes)
    }

    /// Refresh token lifetime as a duration.
    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_ttl_days)
    }

    /// Access credential lifetime in seconds, for client-facing
    /// responses.
    pub fn access_expires_in(&self) -> i64 {
        self.access_token_ttl_minutes * 60
    }

    /// Refresh token lifetime in seconds, for client-facing responses.
    pub fn refresh_expires_in(&self) -> i64 {
        self.refresh_token_ttl_days * 24 * 60 * 60
    }
}
