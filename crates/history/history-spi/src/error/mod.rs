//! Error module containing error types and result aliases

mod history_error;
mod key_error;
mod store_error;

pub use history_error::HistoryError;
pub use key_error::KeyError;
pub use store_error::StoreError;

/// Result type for history store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
