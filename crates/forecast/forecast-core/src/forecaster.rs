//! Baseline forecaster service
//!
//! Joins a [`HistoryStore`] with a [`BaselineModel`]: validates the horizon,
//! reads the series, runs the model and attaches metadata. The numeric work is
//! synchronous; only the store read suspends.

use std::sync::Arc;

use forecast_spi::{
    BaselineModel, ForecastError, ForecastFlag, ForecastMetadata, ForecastVector, Horizon,
    Result, VarianceConfig, VarianceReport, DEFAULT_MAX_HORIZON,
};
use history_spi::{History, HistoryStore, SeriesKey, StoreError};

use crate::variance::compute_variance;

/// Forecasts keyed series with a shared model and store.
///
/// Cheap to clone; holds no per-request state, so concurrent calls never
/// interfere.
#[derive(Clone)]
pub struct BaselineForecaster {
    store: Arc<dyn HistoryStore>,
    model: Arc<dyn BaselineModel>,
    max_horizon: usize,
}

impl std::fmt::Debug for BaselineForecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaselineForecaster")
            .field("store", &self.store.name())
            .field("model", &self.model.name())
            .field("max_horizon", &self.max_horizon)
            .finish()
    }
}

impl BaselineForecaster {
    pub fn new(store: Arc<dyn HistoryStore>, model: Arc<dyn BaselineModel>) -> Self {
        Self {
            store,
            model,
            max_horizon: DEFAULT_MAX_HORIZON,
        }
    }

    /// Cap accepted horizons at `max_horizon` periods.
    pub fn with_max_horizon(mut self, max_horizon: usize) -> Self {
        self.max_horizon = max_horizon;
        self
    }

    pub fn store(&self) -> &dyn HistoryStore {
        self.store.as_ref()
    }

    pub fn model(&self) -> &dyn BaselineModel {
        self.model.as_ref()
    }

    pub fn max_horizon(&self) -> usize {
        self.max_horizon
    }

    /// Forecast `horizon_periods` values following the last observation of `key`.
    ///
    /// The horizon is validated before the store is touched.
    #[tracing::instrument(
        name = "forecast",
        skip(self, key),
        fields(series = %key.fingerprint())
    )]
    pub async fn forecast(&self, key: &SeriesKey, horizon_periods: i64) -> Result<ForecastVector> {
        let horizon = Horizon::bounded(horizon_periods, self.max_horizon)?;
        let history = self.load_history(key).await?;

        let mut forecast = self.forecast_history(&history, horizon)?;
        forecast.metadata.series = Some(key.fingerprint());

        if forecast.metadata.insufficient_history() {
            tracing::warn!(
                available = history.len(),
                required = self.model.order(),
                "forecast ran on a partial window"
            );
        }
        tracing::debug!(
            start_period = forecast.start_period,
            clamped = forecast.metadata.clamped_steps(),
            "forecast complete"
        );

        Ok(forecast)
    }

    /// Forecast directly from a history, without a store.
    pub fn forecast_history(&self, history: &History, horizon: Horizon) -> Result<ForecastVector> {
        run_model(self.model.as_ref(), history, horizon)
    }

    /// Variance of `compare` against `base`, aligned by period.
    #[tracing::instrument(
        name = "variance",
        skip(self, base, compare, config),
        fields(base = %base.fingerprint(), compare = %compare.fingerprint())
    )]
    pub async fn variance(
        &self,
        base: &SeriesKey,
        compare: &SeriesKey,
        config: &VarianceConfig,
    ) -> Result<VarianceReport> {
        config.validate()?;
        let base_history = self.load_history(base).await?;
        let compare_history = self.load_history(compare).await?;

        let mut report = compute_variance(
            base_history.observations(),
            compare_history.observations(),
            config,
        )?;
        report.base_series = Some(base.fingerprint());
        report.compare_series = Some(compare.fingerprint());

        tracing::debug!(
            points = report.points.len(),
            skipped = report.skipped,
            suppressed = report.suppressed,
            "variance complete"
        );
        Ok(report)
    }

    async fn load_history(&self, key: &SeriesKey) -> Result<History> {
        let observations = self.store.observations(key).await.map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "history read failed");
            match e {
                StoreError::Unavailable(reason) => ForecastError::StoreUnavailable(reason),
                StoreError::Malformed(reason) => ForecastError::CorruptHistory {
                    series: key.to_string(),
                    reason,
                },
            }
        })?;

        if observations.is_empty() {
            return Err(ForecastError::SeriesNotFound {
                series: key.to_string(),
            });
        }

        History::new(observations).map_err(|e| {
            tracing::error!(store = self.store.name(), error = %e, "store returned invalid history");
            ForecastError::CorruptHistory {
                series: key.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Run `model` over `history` and attach metadata.
///
/// Pure: the same model, history and horizon always give the same vector.
pub fn run_model(
    model: &dyn BaselineModel,
    history: &History,
    horizon: Horizon,
) -> Result<ForecastVector> {
    let steps = horizon.get();
    let last_period = history.last_period();
    let headroom = i64::MAX.checked_sub(last_period).unwrap_or(i64::MAX);
    if steps as i64 > headroom {
        return Err(ForecastError::InvalidHorizon {
            requested: steps as i64,
            max: headroom as usize,
        });
    }
    let start_period = last_period + 1;

    let projection = model.project(history, horizon)?;
    if projection.values.len() != steps {
        return Err(ForecastError::NumericalError(format!(
            "model '{}' returned {} values for a horizon of {}",
            model.name(),
            projection.values.len(),
            steps
        )));
    }

    let order = model.order();
    let mut flags = Vec::new();
    if history.len() < order {
        flags.push(ForecastFlag::InsufficientHistory {
            available: history.len(),
            required: order,
        });
    }
    if projection.clamped_steps > 0 {
        flags.push(ForecastFlag::Clamped {
            steps: projection.clamped_steps,
        });
    }

    Ok(ForecastVector {
        values: projection.values,
        start_period,
        metadata: ForecastMetadata {
            series: None,
            model: model.name().to_string(),
            order,
            window: projection.window,
            history_len: history.len(),
            flags,
        },
    })
}
