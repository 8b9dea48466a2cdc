//! History store configuration types.

use std::path::PathBuf;
use std::sync::Arc;

use history_core::{InMemoryHistoryStore, JsonFileHistoryStore};
use history_spi::{HistoryStore, StoreError};
use serde::{Deserialize, Serialize};

/// Which history store backs the forecaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-process map, optionally seeded once from a JSON document
    Memory {
        #[serde(default)]
        seed: Option<PathBuf>,
    },
    /// JSON document re-read on every request
    JsonFile { path: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory { seed: None }
    }
}

impl StoreConfig {
    /// Short name of the backend.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Memory { .. } => "memory",
            StoreConfig::JsonFile { .. } => "json_file",
        }
    }
}

/// Open the store described by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn HistoryStore>, StoreError> {
    match config {
        StoreConfig::Memory { seed: None } => Ok(Arc::new(InMemoryHistoryStore::new())),
        StoreConfig::Memory { seed: Some(path) } => {
            let document = JsonFileHistoryStore::new(path.clone()).load().await?;
            let store = InMemoryHistoryStore::from_document(&document)?;
            tracing::info!(
                path = %path.display(),
                series = store.len(),
                "seeded in-memory history store"
            );
            Ok(Arc::new(store))
        }
        StoreConfig::JsonFile { path } => {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "history file does not exist yet");
            }
            Ok(Arc::new(JsonFileHistoryStore::new(path.clone())))
        }
    }
}
