//! History store trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Observation, SeriesKey};

/// Source of historical observations for a series.
///
/// Implementations return observations ordered by period. An unknown key is
/// not an error: it yields an empty vector, and callers decide what a missing
/// series means for them.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Store name, used in logs and readiness reports.
    fn name(&self) -> &str;

    /// Fetch the observations recorded for `key`.
    async fn observations(&self, key: &SeriesKey) -> Result<Vec<Observation>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::DimensionFilters;
    use std::sync::Arc;

    struct FixedStore {
        key: SeriesKey,
        observations: Vec<Observation>,
    }

    #[async_trait]
    impl HistoryStore for FixedStore {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn observations(&self, key: &SeriesKey) -> Result<Vec<Observation>> {
            if key == &self.key {
                Ok(self.observations.clone())
            } else {
                Ok(Vec::new())
            }
        }
    }

    struct DownStore;

    #[async_trait]
    impl HistoryStore for DownStore {
        fn name(&self) -> &str {
            "down"
        }

        async fn observations(&self, _key: &SeriesKey) -> Result<Vec<Observation>> {
            Err(StoreError::Unavailable("connection reset".to_string()))
        }
    }

    fn acme() -> SeriesKey {
        let filters = DimensionFilters::from_pairs([("region", "emea")]).unwrap();
        SeriesKey::new("acme", filters).unwrap()
    }

    #[tokio::test]
    async fn test_store_as_trait_object() {
        let store: Arc<dyn HistoryStore> = Arc::new(FixedStore {
            key: acme(),
            observations: vec![Observation::new(1, 10.0)],
        });
        assert_eq!(store.name(), "fixed");
        assert_eq!(store.observations(&acme()).await.unwrap().len(), 1);
        let other = SeriesKey::scope("acme").unwrap();
        assert!(store.observations(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store: Arc<dyn HistoryStore> = Arc::new(DownStore);
        let err = store.observations(&acme()).await.unwrap_err();
        assert!(err.is_transient());
    }
}
