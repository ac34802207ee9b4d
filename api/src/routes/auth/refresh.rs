use actix_web::{web, HttpResponse};

use bb_core::repositories::{RefreshTokenStore, UserDirectory};

use crate::dto::auth::{RefreshTokenRequest, TokenPairResponse};
use crate::handlers::auth_error_response;

use super::AppState;

/// Handler for POST /api/auth/refresh
///
/// Redeems a refresh token for a fresh access/refresh pair. The
/// submitted token is single-use: it is revoked before the new pair is
/// issued, and replaying it fails.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "9f8e...",
///     "access_expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 403 Forbidden: token unknown, expired, revoked, or owner inactive
/// - 503 Service Unavailable: token store unreachable
pub async fn refresh_token<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    R: RefreshTokenStore + 'static,
    U: UserDirectory + 'static,
{
    match state.token_service.rotate(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => auth_error_response(error),
    }
}
