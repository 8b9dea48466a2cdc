//! In-memory history store.

use std::collections::HashMap;

use history_spi::{
    async_trait, History, HistoryError, HistoryStore, Observation, Result, SeriesKey, StoreError,
};
use parking_lot::RwLock;

use crate::document::HistoryDocument;

/// History store backed by a map behind a read-write lock.
///
/// Every stored series is a validated [`History`], so readers always see
/// ordered, finite observations.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    series: RwLock<HashMap<SeriesKey, History>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a parsed document.
    pub fn from_document(document: &HistoryDocument) -> std::result::Result<Self, StoreError> {
        let store = Self::new();
        for record in &document.series {
            let key = record.key()?;
            if store.contains(&key) {
                return Err(StoreError::Malformed(format!(
                    "series {} listed more than once",
                    key
                )));
            }
            store
                .insert(key.clone(), record.observations.clone())
                .map_err(|e| StoreError::Malformed(format!("series {}: {}", key, e)))?;
        }
        Ok(store)
    }

    /// Replace the history of `key`.
    pub fn insert(
        &self,
        key: SeriesKey,
        observations: Vec<Observation>,
    ) -> std::result::Result<(), HistoryError> {
        let history = History::new(observations)?;
        self.series.write().insert(key, history);
        Ok(())
    }

    /// Append one observation; its period must follow the last stored one.
    pub fn append(
        &self,
        key: SeriesKey,
        observation: Observation,
    ) -> std::result::Result<(), HistoryError> {
        let mut series = self.series.write();
        let mut observations = series
            .get(&key)
            .map(|h| h.observations().to_vec())
            .unwrap_or_default();
        observations.push(observation);
        series.insert(key, History::new(observations)?);
        Ok(())
    }

    pub fn remove(&self, key: &SeriesKey) -> bool {
        self.series.write().remove(key).is_some()
    }

    pub fn contains(&self, key: &SeriesKey) -> bool {
        self.series.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.series.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.read().is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn observations(&self, key: &SeriesKey) -> Result<Vec<Observation>> {
        Ok(self
            .series
            .read()
            .get(key)
            .map(|h| h.observations().to_vec())
            .unwrap_or_default())
    }
}
