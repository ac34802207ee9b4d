use actix_web::{web, HttpResponse};

use bb_core::repositories::{RefreshTokenStore, UserDirectory};

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::auth_error_response;

use super::AppState;

/// Handler for POST /api/auth/logout
///
/// Revokes the submitted refresh token. Always succeeds, with or
/// without a token in the body: a logout is never a probe for whether
/// a token exists.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string (optional)"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 503 Service Unavailable: token store unreachable
pub async fn logout<R, U>(
    state: web::Data<AppState<R, U>>,
    request: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    R: RefreshTokenStore + 'static,
    U: UserDirectory + 'static,
{
    let token = request.and_then(|body| body.into_inner().refresh_token);

    if let Some(token) = token {
        if let Err(error) = state.token_service.logout(&token).await {
            return auth_error_response(error);
        }
    }

    HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
