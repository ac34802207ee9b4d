//! Bearer-credential gate for protected endpoints.
//!
//! The gate extracts the `Authorization: Bearer` header, verifies the
//! access credential with the token service, and injects the caller's
//! identity into request extensions. Verification is pure signature and
//! claims checking; the gate never touches the store, so a protected
//! request costs no database round trip.
//!
//! Every rejection is a uniform 401. The precise reason (missing
//! header, bad signature, expired) is logged at the service layer, not
//! surfaced to the client.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::{header::AUTHORIZATION, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use bb_core::domain::entities::Identity;
use bb_core::errors::AuthError;
use bb_core::repositories::{RefreshTokenStore, UserDirectory};
use bb_core::services::TokenService;

use crate::dto::ErrorResponse;

/// Object-safe verification seam between the gate and the token
/// service.
pub trait Authenticator: Send + Sync {
    /// Resolves an access credential to an identity.
    fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError>;
}

impl<R: RefreshTokenStore, U: UserDirectory> Authenticator for TokenService<R, U> {
    fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError> {
        TokenService::authenticate(self, access_token)
    }
}

/// Caller identity injected into requests that pass the gate.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Identity> for AuthContext {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
        }
    }
}

/// Middleware factory guarding a route or scope.
pub struct AuthGate {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthGate {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// The wrapped service produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(unauthenticated_error()),
            };

            let identity = match authenticator.authenticate(&token) {
                Ok(identity) => identity,
                Err(_) => return Err(unauthenticated_error()),
            };

            req.extensions_mut().insert(AuthContext::from(identity));

            service.call(req).await
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Uniform 401 with the standard JSON error body.
fn unauthenticated_error() -> Error {
    let response: HttpResponse =
        ErrorResponse::new("unauthenticated", "Valid access credentials are required")
            .to_response(StatusCode::UNAUTHORIZED);

    InternalError::from_response("unauthenticated", response).into()
}

/// Extractor for handlers behind the gate.
///
/// Only resolvable on requests the gate has already admitted; using it
/// on an unguarded route yields a 401.
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(unauthenticated_error);

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("token_123".to_string()));

        let no_scheme = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&no_scheme), None);

        let wrong_scheme = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&wrong_scheme), None);

        let absent = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&absent), None);
    }
}
