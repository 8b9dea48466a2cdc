//! JSON document format shared by the file-backed stores.
//!
//! ```json
//! {
//!   "series": [
//!     {
//!       "scoping_id": "acme",
//!       "dimension_filters": {"region": "emea"},
//!       "observations": [{"period": 1, "value": 10.0}]
//!     }
//!   ]
//! }
//! ```

use history_spi::{DimensionFilters, Observation, SeriesKey, StoreError};
use serde::{Deserialize, Serialize};

/// Whole history file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryDocument {
    #[serde(default)]
    pub series: Vec<SeriesRecord>,
}

/// One series and its observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub scoping_id: String,
    #[serde(default)]
    pub dimension_filters: DimensionFilters,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl SeriesRecord {
    pub fn new(key: &SeriesKey, observations: Vec<Observation>) -> Self {
        Self {
            scoping_id: key.scoping_id().to_string(),
            dimension_filters: key.dimension_filters().clone(),
            observations,
        }
    }

    pub fn key(&self) -> Result<SeriesKey, StoreError> {
        SeriesKey::new(self.scoping_id.clone(), self.dimension_filters.clone())
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

impl HistoryDocument {
    /// Parse a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Observations for `key`, or `None` if the document has no such series.
    ///
    /// A key that appears more than once is malformed.
    pub fn find(&self, key: &SeriesKey) -> Result<Option<&[Observation]>, StoreError> {
        let mut found: Option<&[Observation]> = None;
        for record in &self.series {
            if &record.key()? == key {
                if found.is_some() {
                    return Err(StoreError::Malformed(format!(
                        "series {} listed more than once",
                        key
                    )));
                }
                found = Some(record.observations.as_slice());
            }
        }
        Ok(found)
    }
}
