//! Model module containing data structures

mod forecast_vector;
mod horizon;
mod projection;
mod variance;

pub use forecast_vector::{ForecastFlag, ForecastMetadata, ForecastVector};
pub use horizon::{Horizon, DEFAULT_MAX_HORIZON};
pub use projection::Projection;
pub use variance::{Direction, MissingDataPolicy, VarianceConfig, VariancePoint, VarianceReport};
