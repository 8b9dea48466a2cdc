//! History Service Provider Interface
//!
//! Defines series identity (scoping id plus dimension filters), observation
//! sequences, and the trait for stores that serve historical observations.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::HistoryStore;
pub use error::{HistoryError, KeyError, Result, StoreError};
pub use model::{DimensionFilters, FilterValue, History, Observation, SeriesKey};

// Re-exported so implementors do not need their own dependency
pub use async_trait::async_trait;
