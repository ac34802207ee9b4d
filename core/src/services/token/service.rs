//! Token service orchestrating issuance, rotation and revocation.

use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Identity, User};
use crate::errors::AuthError;
use crate::repositories::{RefreshTokenStore, UserDirectory};

use super::codec::AccessTokenCodec;
use super::config::TokenServiceConfig;

/// Orchestrates the credential lifecycle.
///
/// The service owns no mutable state; key material is read-only after
/// construction and all shared mutable state lives behind the store,
/// so the service is freely shared across request handlers.
pub struct TokenService<R: RefreshTokenStore, U: UserDirectory> {
    store: R,
    users: U,
    codec: AccessTokenCodec,
    config: TokenServiceConfig,
}

impl<R: RefreshTokenStore, U: UserDirectory> TokenService<R, U> {
    /// Creates the service, validating the configuration invariants up
    /// front (secret length, TTL ordering).
    pub fn new(store: R, users: U, config: TokenServiceConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let codec = AccessTokenCodec::new(&config);

        Ok(Self {
            store,
            users,
            codec,
            config,
        })
    }

    /// Issues a fresh access/refresh pair for an authenticated user.
    ///
    /// The external auth flow guarantees `user` is active before
    /// calling; no prior state is required.
    pub async fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_token = self.mint_access(user.id, &user.email)?;
        let refresh_token = self.store.create(user.id).await?;

        Ok(self.pair(access_token, refresh_token))
    }

    /// Redeems a refresh token for a new pair, revoking the old record.
    ///
    /// The claim on the old record is a single atomic check-and-set at
    /// the storage layer: of two concurrent calls racing on the same
    /// token, exactly one reaches the mint below. All miss causes
    /// collapse into `InvalidRefreshToken`; callers cannot tell absent
    /// from expired from revoked from owner-inactive.
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let record = self
            .store
            .claim(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let user = match self.users.find_by_id(record.user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                // The claim above already revoked the record, which is
                // the lazy invalidation for a deactivated owner.
                debug!(user_id = %record.user_id, "refresh rejected: owner missing or inactive");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        let access_token = self.mint_access(user.id, &user.email)?;
        let new_refresh_token = self.store.create(user.id).await?;

        Ok(self.pair(access_token, new_refresh_token))
    }

    /// Revokes a single refresh token.
    ///
    /// A token that was never issued is a no-op; logout is not an
    /// information-disclosure channel.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.store.revoke(refresh_token).await?;
        Ok(())
    }

    /// Revokes every outstanding refresh token owned by `user_id`,
    /// returning how many sessions were ended.
    pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, AuthError> {
        Ok(self.store.revoke_all_for_user(user_id).await?)
    }

    /// Resolves an access credential to an identity.
    ///
    /// Purely codec-based, so the auth gate never does a store round
    /// trip. Every codec failure collapses into `Unauthenticated`; the
    /// precise reason is logged, not surfaced.
    pub fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError> {
        let claims = self.codec.verify(access_token).map_err(|e| {
            debug!(reason = %e, "access credential rejected");
            AuthError::Unauthenticated
        })?;

        let user_id = claims.user_id().map_err(|_| AuthError::Unauthenticated)?;

        Ok(Identity {
            user_id,
            email: claims.email,
        })
    }

    /// The codec, for the rare caller that needs raw claims access.
    pub fn codec(&self) -> &AccessTokenCodec {
        &self.codec
    }

    fn mint_access(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        self.codec
            .mint(user_id, email)
            .map_err(|e| AuthError::Internal {
                message: format!("access credential minting failed: {}", e),
            })
    }

    fn pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_expires_in(),
            self.config.refresh_expires_in(),
        )
    }
}
