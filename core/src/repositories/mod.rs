//! Store traits and in-memory implementations.

pub mod token;
pub mod user;

pub use token::{InMemoryTokenStore, RefreshTokenStore};
pub use user::{InMemoryUserDirectory, UserDirectory};
