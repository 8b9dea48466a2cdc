//! Forecast Facade
//!
//! High-level API for the baseline forecaster. Re-exports all public types
//! from the forecast stack for convenient usage.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use forecast_facade::ForecasterBuilder;
//! use history_facade::{InMemoryHistoryStore, Observation, SeriesKey};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryHistoryStore::new();
//!     let key = SeriesKey::scope("acme").unwrap();
//!     store.insert(key.clone(), vec![Observation::new(1, 10.0)]).unwrap();
//!
//!     let forecaster = ForecasterBuilder::new().store(Arc::new(store)).build().unwrap();
//!     let forecast = forecaster.forecast(&key, 3).await.unwrap();
//!     println!("{:?}", forecast.values);
//! }
//! ```

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{forecaster, lag_model, variance};
