//! Forecast Consumer API
//!
//! Consumer configurations and builder APIs for the baseline forecaster.
//!
//! This crate provides:
//! - Configuration types for the lag model and the forecaster
//! - Builder patterns for forecasters and variance settings
//! - Request bodies shared by the HTTP service and the CLI
//! - Re-exports from SPI and core for convenience

pub mod builder;
pub mod config;
pub mod request;

pub use builder::{ForecasterBuilder, VarianceConfigBuilder};
pub use config::{ForecasterConfig, LagModelConfig};
pub use request::{ForecastRequest, SeriesSelector, VarianceRequest};

// Re-export from core
pub use forecast_core::{compute_variance, run_model, BaselineForecaster, LagModel};

// Re-export from SPI
pub use forecast_spi::{
    BaselineModel, Direction, ErrorKind, ForecastError, ForecastFlag, ForecastMetadata,
    ForecastVector, Horizon, MissingDataPolicy, Projection, Result, VarianceConfig,
    VariancePoint, VarianceReport, DEFAULT_MAX_HORIZON,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ForecastRequest, ForecasterBuilder, ForecasterConfig, LagModelConfig,
        VarianceConfigBuilder, VarianceRequest,
    };
    pub use forecast_core::{BaselineForecaster, LagModel};
    pub use forecast_spi::{
        BaselineModel, ForecastError, ForecastVector, Horizon, Result, VarianceConfig,
        VarianceReport,
    };
}
