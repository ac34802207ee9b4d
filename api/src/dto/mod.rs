//! Request and response payloads for the HTTP surface.

pub mod auth;
pub mod error;

pub use error::ErrorResponse;
