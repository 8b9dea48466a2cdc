//! Observation sequence validation errors.

use thiserror::Error;

/// An observation sequence that violates the history invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    /// No observations at all
    #[error("History contains no observations")]
    Empty,

    /// Periods must strictly increase
    #[error("Period {current} does not follow period {previous}")]
    NonIncreasingPeriod { previous: i64, current: i64 },

    /// NaN or infinite value
    #[error("Non-finite value at period {period}")]
    NonFiniteValue { period: i64 },
}
