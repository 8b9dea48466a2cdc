//! Series key: scoping id plus dimension filters.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::dimension_filters::{push_escaped, DimensionFilters};
use crate::error::KeyError;

/// Identifies one logical time series.
///
/// Equal keys always resolve to the same series: the filter set is ordered and
/// the canonical form (and therefore the fingerprint) is independent of the
/// order selections were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "SeriesKeyRepr")]
pub struct SeriesKey {
    scoping_id: String,
    dimension_filters: DimensionFilters,
}

#[derive(Deserialize)]
struct SeriesKeyRepr {
    scoping_id: String,
    #[serde(default)]
    dimension_filters: DimensionFilters,
}

impl TryFrom<SeriesKeyRepr> for SeriesKey {
    type Error = KeyError;

    fn try_from(repr: SeriesKeyRepr) -> Result<Self, Self::Error> {
        Self::new(repr.scoping_id, repr.dimension_filters)
    }
}

impl SeriesKey {
    /// Create a key, rejecting an empty scoping id.
    pub fn new(
        scoping_id: impl Into<String>,
        dimension_filters: DimensionFilters,
    ) -> Result<Self, KeyError> {
        let scoping_id = scoping_id.into();
        if scoping_id.trim().is_empty() {
            return Err(KeyError::EmptyScopingId);
        }
        Ok(Self {
            scoping_id,
            dimension_filters,
        })
    }

    /// Key covering a whole scope with no dimension constraints.
    pub fn scope(scoping_id: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(scoping_id, DimensionFilters::new())
    }

    pub fn scoping_id(&self) -> &str {
        &self.scoping_id
    }

    pub fn dimension_filters(&self) -> &DimensionFilters {
        &self.dimension_filters
    }

    /// Deterministic text form, `scope|dim=a,b;dim2=c`.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        push_escaped(&mut out, &self.scoping_id);
        out.push('|');
        out.push_str(&self.dimension_filters.canonical());
        out
    }

    /// Stable 16 hex digit fingerprint of the canonical form.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.canonical().as_bytes());
        digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
