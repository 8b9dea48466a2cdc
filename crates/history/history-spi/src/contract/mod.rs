//! Contract module containing trait definitions for history access

mod history_store;

pub use history_store::HistoryStore;
