//! Error taxonomy for the session/credential subsystem.

use thiserror::Error;

/// Codec-level diagnostics for access-credential verification.
///
/// The reasons are distinct so the gate can log precise diagnostics,
/// but they are never surfaced to callers; the service collapses all
/// of them into [`AuthError::Unauthenticated`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("issuer or audience mismatch")]
    ClaimsMismatch,

    #[error("malformed token")]
    Malformed,

    #[error("token generation failed")]
    GenerationFailed,
}

/// Store I/O failures.
///
/// Always fail-closed: an unavailable store is never treated as "no
/// record found".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Wraps an I/O-level failure message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Service-boundary error taxonomy.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Absent, expired, revoked, or owner-inactive refresh token.
    /// Deliberately merged: callers cannot probe which case applies.
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// Bad, expired, or missing access credential.
    #[error("unauthenticated")]
    Unauthenticated,

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, AuthError>;
