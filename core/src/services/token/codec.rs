//! Signed-token codec for self-contained access credentials.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Encodes and decodes access credentials.
///
/// Verification is a pure function of the token, the key material and
/// the clock; no store lookup is involved. Key material is read-only
/// after construction.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    access_ttl: Duration,
}

impl AccessTokenCodec {
    /// Builds a codec from the service configuration.
    pub fn new(config: &TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Reject at the stated expiry, not sixty seconds after it.
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            algorithm: config.algorithm,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: config.access_ttl(),
        }
    }

    /// Mints a signed access credential for a user.
    pub fn mint(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        let claims = Claims::new_access_token(
            user_id,
            email,
            self.access_ttl,
            &self.issuer,
            &self.audience,
        );
        self.encode(&claims)
    }

    /// Encodes arbitrary claims. Exposed within the service for tests
    /// that need non-standard expiries.
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|_| TokenError::GenerationFailed)
    }

    /// Verifies a credential and returns its claims.
    ///
    /// Signature mismatch, expiry, and issuer/audience mismatch are
    /// reported as distinct reasons so the gate can log precise
    /// diagnostics.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::ClaimsMismatch,
                _ => TokenError::Malformed,
            })
    }
}
