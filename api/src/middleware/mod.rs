//! HTTP middleware: the bearer-credential gate and CORS.

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, AuthGate, Authenticator};
