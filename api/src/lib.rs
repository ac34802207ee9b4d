//! # Ballotbox API
//!
//! HTTP surface of the session/credential subsystem: token refresh,
//! logout, logout-everywhere, and the bearer-credential gate protecting
//! authenticated routes.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
