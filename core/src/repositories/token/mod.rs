mod mock;
mod r#trait;


pub use mock::InMemoryTokenStore;
pub use r#trait::RefreshTokenStore;
