//! Validated forecast horizon

use serde::Serialize;

use crate::error::{ForecastError, Result};

/// Upper bound on horizon length when none is configured.
pub const DEFAULT_MAX_HORIZON: usize = 1024;

/// Number of future periods to forecast, always in `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Horizon(usize);

impl Horizon {
    /// Validate against [`DEFAULT_MAX_HORIZON`].
    pub fn new(periods: i64) -> Result<Self> {
        Self::bounded(periods, DEFAULT_MAX_HORIZON)
    }

    /// Validate `periods` as a positive integer no larger than `max`.
    pub fn bounded(periods: i64, max: usize) -> Result<Self> {
        let invalid = ForecastError::InvalidHorizon {
            requested: periods,
            max,
        };
        if periods <= 0 {
            return Err(invalid);
        }
        match usize::try_from(periods) {
            Ok(n) if n <= max => Ok(Self(n)),
            _ => Err(invalid),
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}
