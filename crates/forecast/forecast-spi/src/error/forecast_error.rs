//! Forecast error types

use history_spi::KeyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Horizon was zero, negative, or above the configured maximum
    #[error("Invalid horizon {requested}: must be between 1 and {max}")]
    InvalidHorizon { requested: i64, max: usize },

    /// No observations recorded for the series
    #[error("Series not found: {series}")]
    SeriesNotFound { series: String },

    /// Scoping id or dimension filters were rejected
    #[error("Invalid series key: {0}")]
    InvalidKey(#[from] KeyError),

    /// History store transport failure
    #[error("History store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store returned data that violates the history invariants
    #[error("Corrupt history for {series}: {reason}")]
    CorruptHistory { series: String, reason: String },

    /// Invalid model parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

/// Stable, serializable classification of a [`ForecastError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidHorizon,
    SeriesNotFound,
    InvalidKey,
    StoreUnavailable,
    CorruptHistory,
    InvalidParameter,
    NumericalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidHorizon => "InvalidHorizon",
            ErrorKind::SeriesNotFound => "SeriesNotFound",
            ErrorKind::InvalidKey => "InvalidKey",
            ErrorKind::StoreUnavailable => "StoreUnavailable",
            ErrorKind::CorruptHistory => "CorruptHistory",
            ErrorKind::InvalidParameter => "InvalidParameter",
            ErrorKind::NumericalError => "NumericalError",
        }
    }

    /// Caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidHorizon | ErrorKind::SeriesNotFound | ErrorKind::InvalidKey
        )
    }

    /// Transient; the same call may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::StoreUnavailable)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::InvalidHorizon { .. } => ErrorKind::InvalidHorizon,
            ForecastError::SeriesNotFound { .. } => ErrorKind::SeriesNotFound,
            ForecastError::InvalidKey(_) => ErrorKind::InvalidKey,
            ForecastError::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            ForecastError::CorruptHistory { .. } => ErrorKind::CorruptHistory,
            ForecastError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            ForecastError::NumericalError(_) => ErrorKind::NumericalError,
        }
    }

    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_horizon_error_message() {
        let error = ForecastError::InvalidHorizon {
            requested: 0,
            max: 1024,
        };
        assert_eq!(
            error.to_string(),
            "Invalid horizon 0: must be between 1 and 1024"
        );
    }

    #[test]
    fn test_series_not_found_error_message() {
        let error = ForecastError::SeriesNotFound {
            series: "acme|region=emea".to_string(),
        };
        assert_eq!(error.to_string(), "Series not found: acme|region=emea");
    }

    #[test]
    fn test_invalid_key_from_key_error() {
        let error: ForecastError = KeyError::EmptyScopingId.into();
        assert_eq!(error.kind(), ErrorKind::InvalidKey);
        assert_eq!(
            error.to_string(),
            "Invalid series key: Scoping id must not be empty"
        );
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = ForecastError::InvalidParameter {
            name: "weights".to_string(),
            reason: "must not sum to zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'weights': must not sum to zero"
        );
    }

    #[test]
    fn test_kind_mapping() {
        let cases = vec![
            (
                ForecastError::InvalidHorizon {
                    requested: -1,
                    max: 10,
                },
                ErrorKind::InvalidHorizon,
            ),
            (
                ForecastError::SeriesNotFound {
                    series: "x".to_string(),
                },
                ErrorKind::SeriesNotFound,
            ),
            (
                ForecastError::StoreUnavailable("down".to_string()),
                ErrorKind::StoreUnavailable,
            ),
            (
                ForecastError::CorruptHistory {
                    series: "x".to_string(),
                    reason: "dup".to_string(),
                },
                ErrorKind::CorruptHistory,
            ),
            (
                ForecastError::NumericalError("inf".to_string()),
                ErrorKind::NumericalError,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_client_and_retryable_classes() {
        assert!(ErrorKind::InvalidHorizon.is_client_error());
        assert!(ErrorKind::SeriesNotFound.is_client_error());
        assert!(!ErrorKind::StoreUnavailable.is_client_error());

        assert!(ErrorKind::StoreUnavailable.is_retryable());
        assert!(!ErrorKind::SeriesNotFound.is_retryable());
        assert!(!ErrorKind::CorruptHistory.is_retryable());
    }

    #[test]
    fn test_kind_serializes_as_name() {
        let json = serde_json::to_string(&ErrorKind::StoreUnavailable).unwrap();
        assert_eq!(json, "\"StoreUnavailable\"");
        assert_eq!(ErrorKind::InvalidHorizon.to_string(), "InvalidHorizon");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(ForecastError::StoreUnavailable("x".to_string()));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_all_variants_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }
}
