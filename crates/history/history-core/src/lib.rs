//! History Store Core
//!
//! Implementations of the history store contract.

pub mod document;
pub mod json_file;
pub mod memory;

pub use document::{HistoryDocument, SeriesRecord};
pub use json_file::JsonFileHistoryStore;
pub use memory::InMemoryHistoryStore;
