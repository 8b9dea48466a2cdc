//! Variance analysis model

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Whether growth in the measured quantity is good or bad news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Growth is favorable (revenue-like): delta keeps its sign
    #[default]
    Favorable,
    /// Growth is adverse (expense-like): delta is negated
    Adverse,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Favorable => 1.0,
            Direction::Adverse => -1.0,
        }
    }
}

/// Treatment of periods present in only one of the two series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Drop the period
    #[default]
    Skip,
    /// Treat the missing side as zero
    Zero,
}

/// Variance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarianceConfig {
    pub direction: Direction,
    /// Points with `|delta|` below this are suppressed
    pub noise_threshold: f64,
    pub missing: MissingDataPolicy,
    /// Emit relative deltas alongside absolute ones
    pub output_percent: bool,
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Favorable,
            noise_threshold: 0.0,
            missing: MissingDataPolicy::Skip,
            output_percent: true,
        }
    }
}

impl VarianceConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.noise_threshold.is_finite() || self.noise_threshold < 0.0 {
            return Err(ForecastError::invalid_parameter(
                "noise_threshold",
                "must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

/// Variance at one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariancePoint {
    pub period: i64,
    pub base: f64,
    pub compare: f64,
    /// `(compare - base) * sign`
    pub delta: f64,
    /// `delta / base`, so a negative base flips the sign; absent when base is zero or percent output is off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// Variance between a base and a compare series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarianceReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_series: Option<String>,
    pub points: Vec<VariancePoint>,
    /// Periods dropped because one side was missing
    pub skipped: usize,
    /// Points dropped by the noise threshold
    pub suppressed: usize,
}

impl VarianceReport {
    /// Sum of emitted deltas.
    pub fn total_delta(&self) -> f64 {
        self.points.iter().map(|p| p.delta).sum()
    }
}
