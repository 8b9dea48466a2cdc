//! JSON-file history store.

use std::path::{Path, PathBuf};

use history_spi::{async_trait, HistoryStore, Observation, Result, SeriesKey, StoreError};

use crate::document::HistoryDocument;

/// History store that re-reads a JSON document on every call.
///
/// Reading per call keeps answers in step with whatever last wrote the file.
/// I/O failures surface as [`StoreError::Unavailable`], decode failures as
/// [`StoreError::Malformed`].
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<HistoryDocument> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            StoreError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        HistoryDocument::from_slice(&bytes)
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn observations(&self, key: &SeriesKey) -> Result<Vec<Observation>> {
        let document = self.load().await?;
        let observations = document
            .find(key)?
            .map(|obs| obs.to_vec())
            .unwrap_or_default();
        tracing::trace!(
            path = %self.path.display(),
            series = %key.fingerprint(),
            count = observations.len(),
            "read history file"
        );
        Ok(observations)
    }
}
