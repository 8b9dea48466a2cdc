//! Series key validation errors.

use thiserror::Error;

/// Rejected series key or dimension filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Scoping id was empty or whitespace
    #[error("Scoping id must not be empty")]
    EmptyScopingId,

    /// Dimension name was empty or whitespace
    #[error("Dimension name must not be empty")]
    EmptyDimension,

    /// A selected value was empty or whitespace
    #[error("Dimension '{dimension}' has an empty value")]
    EmptyValue { dimension: String },

    /// A dimension was listed with no selected values
    #[error("Dimension '{dimension}' selects no values")]
    EmptySelection { dimension: String },
}
