//! Forecaster configuration.

use std::sync::Arc;

use forecast_core::{BaselineForecaster, LagModel};
use forecast_spi::{ForecastError, Result, DEFAULT_MAX_HORIZON};
use history_spi::HistoryStore;
use serde::{Deserialize, Serialize};

/// Configuration for the lag-model baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagModelConfig {
    /// Number of lags for the equal-weight moving average
    pub order: usize,
    /// Explicit weights, oldest lag first; overrides `order` when set
    pub weights: Option<Vec<f64>>,
    /// Clamp predictions to the observed range
    pub clamp_to_history: bool,
}

impl Default for LagModelConfig {
    fn default() -> Self {
        Self {
            order: LagModel::DEFAULT_ORDER,
            weights: None,
            clamp_to_history: false,
        }
    }
}

impl LagModelConfig {
    /// Effective model order.
    pub fn effective_order(&self) -> usize {
        self.weights.as_ref().map_or(self.order, Vec::len)
    }

    pub fn build(&self) -> Result<LagModel> {
        let model = match &self.weights {
            Some(weights) => LagModel::weighted(weights.clone())?,
            None => LagModel::moving_average(self.order)?,
        };
        Ok(model.with_clamp(self.clamp_to_history))
    }
}

/// Configuration for [`BaselineForecaster`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecasterConfig {
    pub model: LagModelConfig,
    /// Largest accepted horizon
    pub max_horizon: usize,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            model: LagModelConfig::default(),
            max_horizon: DEFAULT_MAX_HORIZON,
        }
    }
}

impl ForecasterConfig {
    /// Build a forecaster reading from `store`.
    pub fn build(&self, store: Arc<dyn HistoryStore>) -> Result<BaselineForecaster> {
        if self.max_horizon == 0 {
            return Err(ForecastError::invalid_parameter(
                "max_horizon",
                "must be at least 1",
            ));
        }
        let model = self.model.build()?;
        Ok(BaselineForecaster::new(store, Arc::new(model)).with_max_horizon(self.max_horizon))
    }
}
