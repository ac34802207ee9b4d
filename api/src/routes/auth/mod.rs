//! Session lifecycle endpoints:
//! - POST /api/auth/refresh (rotate a refresh token)
//! - POST /api/auth/logout (end one session)
//! - POST /api/auth/logout-all (end every session; requires auth)

use std::sync::Arc;

use actix_web::{web, Scope};

use bb_core::repositories::{RefreshTokenStore, UserDirectory};
use bb_core::services::TokenService;

use crate::middleware::AuthGate;

pub mod logout;
pub mod logout_all;
pub mod refresh;

/// Shared application state handed to every handler.
pub struct AppState<R: RefreshTokenStore, U: UserDirectory> {
    pub token_service: Arc<TokenService<R, U>>,
}

impl<R: RefreshTokenStore, U: UserDirectory> AppState<R, U> {
    pub fn new(token_service: Arc<TokenService<R, U>>) -> Self {
        Self { token_service }
    }
}

/// Builds the `/auth` scope.
///
/// Refresh and logout are deliberately unguarded: both are reachable
/// with an expired access credential, which is exactly when a client
/// needs them. Logout-all sits behind the gate because it needs a
/// proven identity to scope the revocation.
pub fn scope<R, U>(gate: AuthGate) -> Scope
where
    R: RefreshTokenStore + 'static,
    U: UserDirectory + 'static,
{
    web::scope("/auth")
        .route("/refresh", web::post().to(refresh::refresh_token::<R, U>))
        .route("/logout", web::post().to(logout::logout::<R, U>))
        .service(
            web::resource("/logout-all")
                .wrap(gate)
                .route(web::post().to(logout_all::logout_all::<R, U>)),
        )
}
