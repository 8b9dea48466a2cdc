//! Dimension filter set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// Wire form of one dimension's selection: a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `"region": "emea"`
    One(String),
    /// `"region": ["emea", "apac"]`
    Many(Vec<String>),
}

/// Immutable, ordered mapping from dimension name to selected values.
///
/// Both dimensions and values are kept sorted, so two filter sets built from
/// the same selections compare and hash equal regardless of the order they
/// were supplied in.
///
/// # Example
///
/// ```rust
/// use history_spi::DimensionFilters;
///
/// let a = DimensionFilters::from_pairs([("region", "emea"), ("product", "widget")]).unwrap();
/// let b = DimensionFilters::from_pairs([("product", "widget"), ("region", "emea")]).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, FilterValue>",
    into = "BTreeMap<String, FilterValue>"
)]
pub struct DimensionFilters {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl DimensionFilters {
    /// Empty filter set (the whole scope).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(dimension, value)` pairs. Repeated dimensions accumulate values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |filters, (dimension, value)| {
                filters.with(dimension, value)
            })
    }

    /// Return a new filter set that also selects `value` on `dimension`.
    pub fn with(
        mut self,
        dimension: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, KeyError> {
        let dimension = dimension.into();
        let value = value.into();
        validate_dimension(&dimension)?;
        validate_value(&dimension, &value)?;
        self.entries.entry(dimension).or_default().insert(value);
        Ok(self)
    }

    /// Selected values for a dimension.
    pub fn get(&self, dimension: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(dimension)
    }

    /// Number of constrained dimensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate dimensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deterministic text form, `dim=a,b;dim2=c`.
    ///
    /// Separator characters inside names and values are percent-escaped so
    /// distinct filter sets never share a canonical form.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for (i, (dimension, values)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            push_escaped(&mut out, dimension);
            out.push('=');
            for (j, value) in values.iter().enumerate() {
                if j > 0 {
                    out.push(',');
                }
                push_escaped(&mut out, value);
            }
        }
        out
    }
}

impl fmt::Display for DimensionFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl TryFrom<BTreeMap<String, FilterValue>> for DimensionFilters {
    type Error = KeyError;

    fn try_from(raw: BTreeMap<String, FilterValue>) -> Result<Self, Self::Error> {
        let mut filters = Self::new();
        for (dimension, selection) in raw {
            let values = match selection {
                FilterValue::One(value) => vec![value],
                FilterValue::Many(values) => values,
            };
            if values.is_empty() {
                validate_dimension(&dimension)?;
                return Err(KeyError::EmptySelection { dimension });
            }
            for value in values {
                filters = filters.with(dimension.clone(), value)?;
            }
        }
        Ok(filters)
    }
}

impl TryFrom<BTreeMap<String, String>> for DimensionFilters {
    type Error = KeyError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_pairs(raw)
    }
}

impl From<DimensionFilters> for BTreeMap<String, FilterValue> {
    fn from(filters: DimensionFilters) -> Self {
        filters
            .entries
            .into_iter()
            .map(|(dimension, values)| {
                let selection = if values.len() == 1 {
                    FilterValue::One(values.into_iter().next().unwrap_or_default())
                } else {
                    FilterValue::Many(values.into_iter().collect())
                };
                (dimension, selection)
            })
            .collect()
    }
}

fn validate_dimension(dimension: &str) -> Result<(), KeyError> {
    if dimension.trim().is_empty() {
        return Err(KeyError::EmptyDimension);
    }
    Ok(())
}

fn validate_value(dimension: &str, value: &str) -> Result<(), KeyError> {
    if value.trim().is_empty() {
        return Err(KeyError::EmptyValue {
            dimension: dimension.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn push_escaped(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '%' | ',' | ';' | '=' | '|' => {
                out.push('%');
                out.push_str(&format!("{:02X}", ch as u32));
            }
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_order_independent_equality_and_hash() {
        let a = DimensionFilters::from_pairs([("region", "emea"), ("product", "widget")]).unwrap();
        let b = DimensionFilters::from_pairs([("product", "widget"), ("region", "emea")]).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_value_order_independent() {
        let a = DimensionFilters::from_pairs([("region", "emea"), ("region", "apac")]).unwrap();
        let b = DimensionFilters::from_pairs([("region", "apac"), ("region", "emea")]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get("region").unwrap().len(), 2);
    }

    #[test]
    fn test_with_returns_new_value() {
        let base = DimensionFilters::new();
        let narrowed = base.clone().with("region", "emea").unwrap();
        assert!(base.is_empty());
        assert_eq!(narrowed.len(), 1);
    }

    #[test]
    fn test_rejects_empty_dimension_and_value() {
        assert_eq!(
            DimensionFilters::from_pairs([(" ", "x")]).unwrap_err(),
            KeyError::EmptyDimension
        );
        assert_eq!(
            DimensionFilters::from_pairs([("region", "")]).unwrap_err(),
            KeyError::EmptyValue {
                dimension: "region".to_string()
            }
        );
    }

    #[test]
    fn test_canonical_form_is_sorted() {
        let filters =
            DimensionFilters::from_pairs([("z", "2"), ("a", "b"), ("a", "a")]).unwrap();
        assert_eq!(filters.canonical(), "a=a,b;z=2");
    }

    #[test]
    fn test_canonical_escapes_separators() {
        let joined = DimensionFilters::from_pairs([("a", "b,c")]).unwrap();
        let split = DimensionFilters::from_pairs([("a", "b"), ("a", "c")]).unwrap();
        assert_ne!(joined.canonical(), split.canonical());
        assert_eq!(joined.canonical(), "a=b%2Cc");
    }

    #[test]
    fn test_deserialize_single_and_many() {
        let filters: DimensionFilters =
            serde_json::from_str(r#"{"region": "emea", "product": ["b", "a"]}"#).unwrap();
        assert_eq!(filters.canonical(), "product=a,b;region=emea");
    }

    #[test]
    fn test_deserialize_rejects_empty_selection() {
        let result: Result<DimensionFilters, _> = serde_json::from_str(r#"{"region": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_collapses_single_values() {
        let filters =
            DimensionFilters::from_pairs([("region", "emea"), ("product", "a"), ("product", "b")])
                .unwrap();
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"product": ["a", "b"], "region": "emea"})
        );
    }
}
