//! Business services of the credential subsystem.

pub mod token;

pub use token::{AccessTokenCodec, SweeperConfig, TokenService, TokenServiceConfig, TokenSweeper};
