//! Data models for series identity and observations.

mod dimension_filters;
mod observation;
mod series_key;

pub use dimension_filters::{DimensionFilters, FilterValue};
pub use observation::{History, Observation};
pub use series_key::SeriesKey;
