//! Request bodies shared by the HTTP service and the CLI.

use std::collections::BTreeMap;

use forecast_spi::{Result, VarianceConfig};
use history_spi::{DimensionFilters, FilterValue, SeriesKey};
use serde::{Deserialize, Serialize};

/// A scoping id plus dimension filters, as sent by clients.
///
/// Kept unvalidated on the wire so that bad keys surface as
/// [`ForecastError::InvalidKey`](forecast_spi::ForecastError::InvalidKey)
/// rather than as a body-parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSelector {
    pub scoping_id: String,
    #[serde(default)]
    pub dimension_filters: BTreeMap<String, FilterValue>,
}

impl SeriesSelector {
    pub fn series_key(&self) -> Result<SeriesKey> {
        let filters = DimensionFilters::try_from(self.dimension_filters.clone())?;
        Ok(SeriesKey::new(self.scoping_id.clone(), filters)?)
    }
}

/// Body of an auto-baseline forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub scoping_id: String,
    #[serde(default)]
    pub dimension_filters: BTreeMap<String, FilterValue>,
    pub horizon_periods: i64,
}

impl ForecastRequest {
    pub fn series_key(&self) -> Result<SeriesKey> {
        SeriesSelector {
            scoping_id: self.scoping_id.clone(),
            dimension_filters: self.dimension_filters.clone(),
        }
        .series_key()
    }
}

/// Body of a variance request; settings not given fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceRequest {
    pub base: SeriesSelector,
    pub compare: SeriesSelector,
    #[serde(flatten)]
    pub config: VarianceConfig,
}
