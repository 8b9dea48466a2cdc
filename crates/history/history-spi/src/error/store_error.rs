//! History store error types.

use thiserror::Error;

/// Errors raised by a [`HistoryStore`](crate::HistoryStore) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Transport or I/O failure; the caller may retry.
    #[error("History store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered, but its content could not be decoded.
    #[error("Malformed history data: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
