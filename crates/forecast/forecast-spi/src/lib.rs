//! Forecast Service Provider Interface
//!
//! Defines the baseline model trait, the forecast and variance result types,
//! and the error taxonomy shared by every forecasting crate.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::BaselineModel;
pub use error::{ErrorKind, ForecastError, Result};
pub use model::{
    Direction, ForecastFlag, ForecastMetadata, ForecastVector, Horizon, MissingDataPolicy,
    Projection, VarianceConfig, VariancePoint, VarianceReport, DEFAULT_MAX_HORIZON,
};
