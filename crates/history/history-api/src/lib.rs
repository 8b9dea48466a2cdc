//! History Consumer API
//!
//! Store configuration, the store factory, and key builders.

pub mod builder;
pub mod config;

pub use builder::SeriesKeyBuilder;
pub use config::{open_store, StoreConfig};

// Re-export from core
pub use history_core::{HistoryDocument, InMemoryHistoryStore, JsonFileHistoryStore, SeriesRecord};

// Re-export from SPI
pub use history_spi::{
    DimensionFilters, History, HistoryError, HistoryStore, KeyError, Observation, Result,
    SeriesKey, StoreError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{open_store, SeriesKeyBuilder, StoreConfig};
    pub use history_spi::{
        DimensionFilters, History, HistoryStore, Observation, SeriesKey, StoreError,
    };
}
