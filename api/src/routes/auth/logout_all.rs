use actix_web::{web, HttpResponse};

use bb_core::repositories::{RefreshTokenStore, UserDirectory};

use crate::dto::auth::LogoutAllResponse;
use crate::handlers::auth_error_response;
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for POST /api/auth/logout-all
///
/// Ends every session of the authenticated caller by revoking all of
/// their outstanding refresh tokens. Requires a valid access
/// credential; the identity it proves scopes the revocation.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "All sessions ended",
///     "sessions_ended": 3
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: missing or invalid access credential
/// - 503 Service Unavailable: token store unreachable
pub async fn logout_all<R, U>(
    ctx: AuthContext,
    state: web::Data<AppState<R, U>>,
) -> HttpResponse
where
    R: RefreshTokenStore + 'static,
    U: UserDirectory + 'static,
{
    match state.token_service.logout_all(ctx.user_id).await {
        Ok(sessions_ended) => HttpResponse::Ok().json(LogoutAllResponse {
            message: "All sessions ended".to_string(),
            sessions_ended,
        }),
        Err(error) => auth_error_response(error),
    }
}
