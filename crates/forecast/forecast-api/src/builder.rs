//! Builders for the forecaster and variance settings.

use std::sync::Arc;

use forecast_core::BaselineForecaster;
use forecast_spi::{Direction, ForecastError, MissingDataPolicy, Result, VarianceConfig};
use history_spi::HistoryStore;

use crate::ForecasterConfig;

/// Builder for [`BaselineForecaster`].
#[derive(Default)]
pub struct ForecasterBuilder {
    store: Option<Arc<dyn HistoryStore>>,
    config: ForecasterConfig,
}

impl ForecasterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Store ==========

    /// Set the history store.
    pub fn store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    // ========== Model ==========

    /// Equal-weight moving average over `order` lags.
    pub fn order(mut self, order: usize) -> Self {
        self.config.model.order = order;
        self.config.model.weights = None;
        self
    }

    /// Explicit lag weights, oldest first.
    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.config.model.weights = Some(weights);
        self
    }

    pub fn clamp_to_history(mut self, clamp: bool) -> Self {
        self.config.model.clamp_to_history = clamp;
        self
    }

    pub fn max_horizon(mut self, max_horizon: usize) -> Self {
        self.config.max_horizon = max_horizon;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ForecasterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<BaselineForecaster> {
        let store = self
            .store
            .ok_or_else(|| ForecastError::invalid_parameter("store", "no history store set"))?;
        self.config.build(store)
    }
}

/// Builder for [`VarianceConfig`].
#[derive(Debug, Clone, Default)]
pub struct VarianceConfigBuilder {
    config: VarianceConfig,
}

impl VarianceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Treat increases as unfavorable.
    pub fn adverse(self) -> Self {
        self.direction(Direction::Adverse)
    }

    pub fn noise_threshold(mut self, threshold: f64) -> Self {
        self.config.noise_threshold = threshold;
        self
    }

    pub fn missing(mut self, policy: MissingDataPolicy) -> Self {
        self.config.missing = policy;
        self
    }

    pub fn output_percent(mut self, enabled: bool) -> Self {
        self.config.output_percent = enabled;
        self
    }

    pub fn build(self) -> Result<VarianceConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
