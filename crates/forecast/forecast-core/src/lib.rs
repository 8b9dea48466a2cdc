//! Forecast Core
//!
//! The recursive lag-model baseline, the store-backed forecaster service and
//! period-aligned variance analysis.

pub mod forecaster;
pub mod lag_model;
pub mod variance;

// Re-export SPI types for implementations
pub use forecast_spi::{
    BaselineModel, Direction, ErrorKind, ForecastError, ForecastFlag, ForecastMetadata,
    ForecastVector, Horizon, MissingDataPolicy, Projection, Result, VarianceConfig,
    VariancePoint, VarianceReport, DEFAULT_MAX_HORIZON,
};

// Re-export main types
pub use forecaster::{run_model, BaselineForecaster};
pub use lag_model::LagModel;
pub use variance::compute_variance;
