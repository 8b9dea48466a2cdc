//! Forecast result model

use serde::{Deserialize, Serialize};

/// Condition attached to a successful forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastFlag {
    /// Fewer observations than the model order; a partial window was used.
    InsufficientHistory { available: usize, required: usize },
    /// Some predictions were clamped to the observed range.
    Clamped { steps: usize },
}

/// How a forecast was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetadata {
    /// Series fingerprint, when the forecast came from a keyed series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// Model name
    pub model: String,
    /// Configured number of lags
    pub order: usize,
    /// Lags actually used for the first step
    pub window: usize,
    /// Number of historical observations
    pub history_len: usize,
    /// Degradation and adjustment flags
    #[serde(default)]
    pub flags: Vec<ForecastFlag>,
}

impl ForecastMetadata {
    /// True when the forecast ran on a partial window.
    pub fn insufficient_history(&self) -> bool {
        self.flags
            .iter()
            .any(|f| matches!(f, ForecastFlag::InsufficientHistory { .. }))
    }

    /// Number of clamped steps, zero if none.
    pub fn clamped_steps(&self) -> usize {
        self.flags
            .iter()
            .find_map(|f| match f {
                ForecastFlag::Clamped { steps } => Some(*steps),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// One value per future period, starting right after the last observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastVector {
    /// Forecast values
    #[serde(rename = "forecast")]
    pub values: Vec<f64>,
    /// Period of the first forecast value
    pub start_period: i64,
    /// Production details
    pub metadata: ForecastMetadata,
}

impl ForecastVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(period, value)` pairs.
    ///
    /// A forecast ending at `i64::MAX` is valid, so periods are computed per
    /// index rather than from an open range.
    pub fn periods(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &value)| (self.start_period + i as i64, value))
    }
}
