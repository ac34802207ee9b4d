//! Shared handler plumbing.

pub mod error;

pub use error::auth_error_response;
