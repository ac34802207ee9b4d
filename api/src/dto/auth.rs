//! Auth endpoint payloads.

use serde::{Deserialize, Serialize};

use bb_core::domain::entities::TokenPair;

/// Request body for POST /api/auth/refresh.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshTokenRequest {
    /// Opaque refresh token obtained at login or a prior refresh
    pub refresh_token: String,
}

/// Response body carrying a freshly issued credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    /// Signed access credential
    pub access_token: String,
    /// Opaque refresh token replacing the one just redeemed
    pub refresh_token: String,
    /// Access credential lifetime in seconds
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

/// Request body for POST /api/auth/logout.
///
/// The token is optional: a logout with nothing to revoke still
/// succeeds.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Response body for POST /api/auth/logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Response body for POST /api/auth/logout-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutAllResponse {
    pub message: String,
    /// How many outstanding sessions were ended
    pub sessions_ended: usize,
}
