//! Maps domain errors onto HTTP responses.
//!
//! Status mapping:
//!
//! | Domain error          | Status |
//! |-----------------------|--------|
//! | `InvalidRefreshToken` | 403    |
//! | `Unauthenticated`     | 401    |
//! | `StoreUnavailable`    | 503    |
//! | everything else       | 500    |
//!
//! Bodies carry a stable machine-readable code but never the precise
//! rejection reason; an absent token and a revoked token produce
//! byte-identical responses.

use actix_web::{http::StatusCode, HttpResponse};

use bb_core::errors::AuthError;

use crate::dto::ErrorResponse;

/// Renders an [`AuthError`] as the endpoint's failure response.
pub fn auth_error_response(error: AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidRefreshToken => ErrorResponse::new(
            "invalid_refresh_token",
            "Refresh token is invalid or expired",
        )
        .to_response(StatusCode::FORBIDDEN),

        AuthError::Unauthenticated => {
            ErrorResponse::new("unauthenticated", "Valid access credentials are required")
                .to_response(StatusCode::UNAUTHORIZED)
        }

        AuthError::StoreUnavailable(e) => {
            log::error!("token store unavailable: {}", e);
            ErrorResponse::new("service_unavailable", "Service temporarily unavailable")
                .to_response(StatusCode::SERVICE_UNAVAILABLE)
        }

        AuthError::Configuration { message } | AuthError::Internal { message } => {
            log::error!("internal auth failure: {}", message);
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_core::errors::StoreError;

    #[test]
    fn test_invalid_refresh_token_is_forbidden() {
        let response = auth_error_response(AuthError::InvalidRefreshToken);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unauthenticated_is_unauthorized() {
        let response = auth_error_response(AuthError::Unauthenticated);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_unavailable_is_service_unavailable() {
        let response =
            auth_error_response(AuthError::StoreUnavailable(StoreError::unavailable("down")));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_is_server_error() {
        let response = auth_error_response(AuthError::Internal {
            message: "boom".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
