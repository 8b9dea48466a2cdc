//! Builder for series keys.

use history_spi::{DimensionFilters, KeyError, SeriesKey};

/// Builder for [`SeriesKey`].
///
/// The first invalid filter is remembered and reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SeriesKeyBuilder {
    scoping_id: Option<String>,
    filters: DimensionFilters,
    error: Option<KeyError>,
}

impl SeriesKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoping id.
    pub fn scoping_id(mut self, scoping_id: impl Into<String>) -> Self {
        self.scoping_id = Some(scoping_id.into());
        self
    }

    /// Select `value` on `dimension`; may be called repeatedly.
    pub fn filter(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match std::mem::take(&mut self.filters).with(dimension, value) {
            Ok(filters) => self.filters = filters,
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Build the key.
    pub fn build(self) -> Result<SeriesKey, KeyError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let scoping_id = self.scoping_id.ok_or(KeyError::EmptyScopingId)?;
        SeriesKey::new(scoping_id, self.filters)
    }
}
