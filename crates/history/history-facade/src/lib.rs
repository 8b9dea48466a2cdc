//! History Facade
//!
//! Unified re-exports for the history module:
//! - `history_spi` - series keys, observations, the store trait and errors
//! - `history_api` - store configuration, factory and builders
//! - `history_core` - in-memory and JSON-file stores
//!
//! # Example
//!
//! ```rust,ignore
//! use history_facade::{open_store, SeriesKeyBuilder, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = open_store(&StoreConfig::default()).await.unwrap();
//!     let key = SeriesKeyBuilder::new().scoping_id("acme").build().unwrap();
//!     let observations = store.observations(&key).await.unwrap();
//!     println!("{} observations", observations.len());
//! }
//! ```

// Re-export everything from SPI
pub use history_spi::*;

// Re-export everything from API
pub use history_api::{open_store, prelude, SeriesKeyBuilder, StoreConfig};

// Re-export everything from Core
pub use history_core::*;
