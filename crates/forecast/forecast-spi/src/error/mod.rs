//! Error module containing error types and result aliases

mod forecast_error;

pub use forecast_error::{ErrorKind, ForecastError};

/// Result type for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
