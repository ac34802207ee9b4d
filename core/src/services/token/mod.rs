//! Token service module
//!
//! This module handles the credential lifecycle:
//! - access-credential minting and verification (signed-token codec)
//! - refresh token issuance, single-use rotation and revocation
//! - background cleanup of dead refresh records

mod codec;
mod config;
mod service;
mod sweeper;

#[cfg(test)]
mod tests;

pub use codec::AccessTokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use sweeper::{SweeperConfig, TokenSweeper};
