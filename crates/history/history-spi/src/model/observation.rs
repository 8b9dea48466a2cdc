//! Observations and validated histories.

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// A single observed value at an integer period index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Period index
    pub period: i64,
    /// Observed value
    pub value: f64,
}

impl Observation {
    pub fn new(period: i64, value: f64) -> Self {
        Self { period, value }
    }
}

/// Non-empty observation sequence with strictly increasing periods and finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    observations: Vec<Observation>,
}

impl History {
    /// Validate an ordered observation sequence.
    pub fn new(observations: Vec<Observation>) -> Result<Self, HistoryError> {
        if observations.is_empty() {
            return Err(HistoryError::Empty);
        }

        for obs in &observations {
            if !obs.value.is_finite() {
                return Err(HistoryError::NonFiniteValue { period: obs.period });
            }
        }

        for pair in observations.windows(2) {
            if pair[1].period <= pair[0].period {
                return Err(HistoryError::NonIncreasingPeriod {
                    previous: pair[0].period,
                    current: pair[1].period,
                });
            }
        }

        Ok(Self { observations })
    }

    /// Consecutive periods starting at `start_period`.
    pub fn from_values(start_period: i64, values: &[f64]) -> Result<Self, HistoryError> {
        let observations = values
            .iter()
            .zip(start_period..)
            .map(|(&value, period)| Observation::new(period, value))
            .collect();
        Self::new(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Values in period order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_period(&self) -> i64 {
        self.observations[0].period
    }

    pub fn last_period(&self) -> i64 {
        self.observations[self.observations.len() - 1].period
    }

    /// Observed (min, max) of the values.
    pub fn range(&self) -> (f64, f64) {
        self.observations
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
                (lo.min(o.value), hi.max(o.value))
            })
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }
}

impl TryFrom<Vec<Observation>> for History {
    type Error = HistoryError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        Self::new(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_history() {
        let history = History::from_values(100, &[10.0, 12.0, 11.0, 13.0]).unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.first_period(), 100);
        assert_eq!(history.last_period(), 103);
        assert_eq!(history.values(), vec![10.0, 12.0, 11.0, 13.0]);
        assert_eq!(history.range(), (10.0, 13.0));
    }

    #[test]
    fn test_gaps_are_allowed() {
        let history = History::new(vec![
            Observation::new(1, 5.0),
            Observation::new(4, 6.0),
            Observation::new(9, 7.0),
        ])
        .unwrap();
        assert_eq!(history.last_period(), 9);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(History::new(vec![]).unwrap_err(), HistoryError::Empty);
    }

    #[test]
    fn test_duplicate_period_rejected() {
        let err = History::new(vec![Observation::new(3, 1.0), Observation::new(3, 2.0)])
            .unwrap_err();
        assert_eq!(
            err,
            HistoryError::NonIncreasingPeriod {
                previous: 3,
                current: 3
            }
        );
    }

    #[test]
    fn test_decreasing_period_rejected() {
        let err = History::new(vec![Observation::new(5, 1.0), Observation::new(2, 2.0)])
            .unwrap_err();
        assert!(matches!(err, HistoryError::NonIncreasingPeriod { .. }));
    }

    #[test]
    fn test_nan_rejected() {
        let err = History::from_values(0, &[1.0, f64::NAN]).unwrap_err();
        assert_eq!(err, HistoryError::NonFiniteValue { period: 1 });
    }

    #[test]
    fn test_observation_serde_shape() {
        let obs: Observation = serde_json::from_str(r#"{"period": 4, "value": 2.5}"#).unwrap();
        assert_eq!(obs, Observation::new(4, 2.5));
    }
}
