//! MySQL implementations of the core store traits.

mod refresh_token_store;
mod user_directory;

pub use refresh_token_store::MySqlRefreshTokenStore;
pub use user_directory::MySqlUserDirectory;

use bb_core::errors::StoreError;

/// Maps a SQLx failure to the fail-closed store error.
pub(crate) fn store_err(e: sqlx::Error) -> StoreError {
    StoreError::unavailable(e.to_string())
}
