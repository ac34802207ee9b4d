pub mod token;
pub mod user;

pub use token::{hash_token, Claims, RefreshRecord, TokenPair};
pub use user::{Identity, User};
