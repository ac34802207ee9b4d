//! Token entities: signed access-credential claims and persisted
//! refresh records.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Access credential lifetime (15 minutes).
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh record lifetime (7 days).
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// JWT issuer claim value.
pub const JWT_ISSUER: &str = "ballotbox";

/// JWT audience claim value.
pub const JWT_AUDIENCE: &str = "ballotbox-api";

/// Entropy of the opaque refresh token in bytes (256 bits).
const REFRESH_TOKEN_BYTES: usize = 32;

/// Claims carried by a signed access credential.
///
/// The credential is self-contained: a valid signature plus an
/// unexpired `exp` is sufficient proof of identity for the request
/// window, with no store lookup. There is deliberately no server-side
/// revocation for access credentials; the short TTL bounds the blast
/// radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the subject
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for an access credential expiring `ttl` from now.
    pub fn new_access_token(
        user_id: Uuid,
        email: &str,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks whether the claims have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Parses the subject as a user ID.
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Hashes a raw refresh token for storage and lookup.
///
/// Only the hash ever touches the store, so a leaked table does not
/// leak redeemable tokens.
pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Refresh record persisted by the store.
///
/// State machine: `Active -> Revoked` is the only transition and it is
/// monotonic; expiry takes effect by clock advance alone. Deletion by
/// the sweeper is storage reclamation, not a logical state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this record belongs to
    pub user_id: Uuid,

    /// SHA-256 hash of the opaque token value
    pub token_hash: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record expires
    pub expires_at: DateTime<Utc>,

    /// Whether the record has been revoked
    pub revoked: bool,
}

impl RefreshRecord {
    /// Generates a fresh opaque token and the record backing it.
    ///
    /// The raw token is `REFRESH_TOKEN_BYTES` of CSPRNG output, hex
    /// encoded; the record keeps only its hash.
    pub fn issue(user_id: Uuid, ttl: Duration) -> (String, Self) {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let raw = hex::encode(bytes);

        let now = Utc::now();
        let record = Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash: hash_token(&raw),
            created_at: now,
            expires_at: now + ttl,
            revoked: false,
        };

        (raw, record)
    }

    /// Checks whether the record has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Valid iff neither revoked nor expired. Owner activity is checked
    /// at the store lookup, not here.
    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }

    /// Marks the record revoked. Nothing un-revokes a record.
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

/// Access/refresh pair returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access credential
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access credential lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair.
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
