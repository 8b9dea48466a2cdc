//! Recursive lag-model baseline
//!
//! Each future value is a weighted combination of the last `k` known values.
//! Predictions are pushed back into the window as pseudo-observations, so a
//! horizon of `h` runs `h` one-step forecasts in sequence.
//!
//! ## Partial windows
//!
//! With `m < k` observations the model uses the `m` most recent weights,
//! rescaled to the full weight sum. With equal weights that is the plain mean
//! of whatever is available. The window grows with each pseudo-observation
//! until it reaches `k`.

use std::collections::VecDeque;

use forecast_spi::{BaselineModel, ForecastError, Horizon, Projection, Result};
use history_spi::History;

/// Fixed-order autoregressive baseline.
///
/// @algorithm LagModel
/// @category Baseline
/// @complexity O(h*k) project
/// @thread_safe true
///
/// # Example
///
/// ```rust
/// use forecast_core::LagModel;
/// use forecast_spi::{BaselineModel, Horizon};
/// use history_spi::History;
///
/// let history = History::from_values(1, &[10.0, 12.0, 11.0, 13.0]).unwrap();
/// let model = LagModel::moving_average(4).unwrap();
/// let projection = model.project(&history, Horizon::new(2).unwrap()).unwrap();
/// assert_eq!(projection.values, vec![11.5, 11.875]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LagModel {
    /// Weights ordered oldest to newest
    weights: Vec<f64>,
    /// `tables[m - 1]` holds the weights applied to a window of `m` values
    tables: Vec<Vec<f64>>,
    /// Clamp predictions to the observed [min, max]
    clamp_to_history: bool,
}

impl LagModel {
    /// Order used when none is configured.
    pub const DEFAULT_ORDER: usize = 4;

    /// Equal weights over `order` lags (trailing moving average).
    pub fn moving_average(order: usize) -> Result<Self> {
        if order == 0 {
            return Err(ForecastError::invalid_parameter("order", "must be at least 1"));
        }
        Self::weighted(vec![1.0 / order as f64; order])
    }

    /// Explicit weights, oldest lag first. Their count is the model order.
    pub fn weighted(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(ForecastError::invalid_parameter(
                "weights",
                "must contain at least one weight",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ForecastError::invalid_parameter(
                "weights",
                "all weights must be finite",
            ));
        }
        let total: f64 = weights.iter().sum();
        if total.abs() <= f64::EPSILON {
            return Err(ForecastError::invalid_parameter(
                "weights",
                "must not sum to zero",
            ));
        }

        let tables = (1..=weights.len())
            .map(|m| partial_weights(&weights, total, m))
            .collect();

        Ok(Self {
            weights,
            tables,
            clamp_to_history: false,
        })
    }

    /// Enable or disable clamping to the observed range.
    pub fn with_clamp(mut self, clamp_to_history: bool) -> Self {
        self.clamp_to_history = clamp_to_history;
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn clamps(&self) -> bool {
        self.clamp_to_history
    }

    /// Weights applied to a window of `len` values.
    pub fn window_weights(&self, len: usize) -> &[f64] {
        &self.tables[len.clamp(1, self.weights.len()) - 1]
    }
}

impl Default for LagModel {
    fn default() -> Self {
        let order = Self::DEFAULT_ORDER;
        let weights = vec![1.0 / order as f64; order];
        let tables = (1..=order)
            .map(|m| partial_weights(&weights, 1.0, m))
            .collect();
        Self {
            weights,
            tables,
            clamp_to_history: false,
        }
    }
}

/// The `m` most recent weights rescaled to `total`.
fn partial_weights(weights: &[f64], total: f64, m: usize) -> Vec<f64> {
    let tail = &weights[weights.len() - m..];
    if m == weights.len() {
        return tail.to_vec();
    }
    let tail_sum: f64 = tail.iter().sum();
    if tail_sum.abs() <= f64::EPSILON {
        return vec![total / m as f64; m];
    }
    let scale = total / tail_sum;
    tail.iter().map(|w| w * scale).collect()
}

impl BaselineModel for LagModel {
    fn name(&self) -> &str {
        "lag"
    }

    fn order(&self) -> usize {
        self.weights.len()
    }

    fn project(&self, history: &History, horizon: Horizon) -> Result<Projection> {
        let order = self.order();
        let observed = history.observations();
        let available = observed.len().min(order);
        let bounds = self.clamp_to_history.then(|| history.range());

        let mut window: VecDeque<f64> = observed[observed.len() - available..]
            .iter()
            .map(|o| o.value)
            .collect();
        let mut values = Vec::with_capacity(horizon.get());
        let mut clamped_steps = 0;

        for step in 1..=horizon.get() {
            let raw: f64 = self
                .window_weights(window.len())
                .iter()
                .zip(window.iter())
                .map(|(w, v)| w * v)
                .sum();

            if !raw.is_finite() {
                return Err(ForecastError::NumericalError(format!(
                    "non-finite prediction at step {}",
                    step
                )));
            }

            let value = match bounds {
                Some((lo, hi)) if raw < lo || raw > hi => {
                    clamped_steps += 1;
                    raw.clamp(lo, hi)
                }
                _ => raw,
            };

            values.push(value);
            if window.len() == order {
                window.pop_front();
            }
            window.push_back(value);
        }

        Ok(Projection {
            values,
            window: available,
            clamped_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} vs {}", a, e);
        }
    }

    fn project(model: &LagModel, values: &[f64], horizon: i64) -> Projection {
        let history = History::from_values(1, values).unwrap();
        model.project(&history, Horizon::new(horizon).unwrap()).unwrap()
    }

    #[test]
    fn test_moving_average_one_step() {
        let model = LagModel::moving_average(4).unwrap();
        let p = project(&model, &[10.0, 12.0, 11.0, 13.0], 1);
        assert_eq!(p.values, vec![11.5]);
        assert_eq!(p.window, 4);
    }

    #[test]
    fn test_recursive_feed_forward() {
        let model = LagModel::moving_average(4).unwrap();
        let p = project(&model, &[10.0, 12.0, 11.0, 13.0], 2);
        assert_eq!(p.values, vec![11.5, 11.875]);
    }

    #[test]
    fn test_default_matches_moving_average_of_four() {
        assert_eq!(LagModel::default(), LagModel::moving_average(4).unwrap());
    }

    #[test]
    fn test_only_trailing_window_matters() {
        let model = LagModel::moving_average(2).unwrap();
        let p = project(&model, &[1000.0, -50.0, 4.0, 6.0], 1);
        assert_eq!(p.values, vec![5.0]);
    }

    #[test]
    fn test_partial_window_uses_available_points() {
        let model = LagModel::moving_average(4).unwrap();
        let p = project(&model, &[10.0, 20.0], 3);
        assert_eq!(p.window, 2);
        assert_close(&p.values, &[15.0, 15.0, 15.0]);
    }

    #[test]
    fn test_single_observation() {
        let model = LagModel::moving_average(4).unwrap();
        let p = project(&model, &[7.0], 5);
        assert_eq!(p.window, 1);
        assert_close(&p.values, &[7.0; 5]);
    }

    #[test]
    fn test_weighted_model() {
        // 0.2 * 10 + 0.8 * 20
        let model = LagModel::weighted(vec![0.2, 0.8]).unwrap();
        let p = project(&model, &[10.0, 20.0], 2);
        assert_close(&p.values, &[18.0, 0.2 * 20.0 + 0.8 * 18.0]);
    }

    #[test]
    fn test_partial_weights_rescale_to_total() {
        let model = LagModel::weighted(vec![1.0, 1.0, 2.0]).unwrap();
        // Most recent two weights [1, 2] rescaled to sum 4
        assert_close(model.window_weights(2), &[4.0 / 3.0, 8.0 / 3.0]);
        assert_close(model.window_weights(3), &[1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_partial_weights_zero_tail_splits_evenly() {
        let model = LagModel::weighted(vec![2.0, 0.0]).unwrap();
        assert_close(model.window_weights(1), &[2.0]);
    }

    #[test]
    fn test_growth_weights_without_clamp_drift() {
        let model = LagModel::weighted(vec![1.1]).unwrap();
        let p = project(&model, &[100.0], 3);
        assert_close(&p.values, &[110.0, 121.0, 133.1]);
        assert_eq!(p.clamped_steps, 0);
    }

    #[test]
    fn test_clamp_bounds_drift() {
        let model = LagModel::weighted(vec![1.1]).unwrap().with_clamp(true);
        let p = project(&model, &[90.0, 100.0], 3);
        assert_close(&p.values, &[100.0, 100.0, 100.0]);
        assert_eq!(p.clamped_steps, 3);
    }

    #[test]
    fn test_clamp_lower_bound() {
        let model = LagModel::weighted(vec![0.5]).unwrap().with_clamp(true);
        let p = project(&model, &[50.0, 80.0], 2);
        assert_close(&p.values, &[50.0, 50.0]);
        assert_eq!(p.clamped_steps, 2);
    }

    #[test]
    fn test_clamp_leaves_in_range_values() {
        let model = LagModel::moving_average(4).unwrap().with_clamp(true);
        let p = project(&model, &[10.0, 12.0, 11.0, 13.0], 2);
        assert_eq!(p.values, vec![11.5, 11.875]);
        assert_eq!(p.clamped_steps, 0);
    }

    #[test]
    fn test_overflow_is_numerical_error() {
        let model = LagModel::weighted(vec![1e300]).unwrap();
        let history = History::from_values(1, &[1e300]).unwrap();
        let err = model
            .project(&history, Horizon::new(1).unwrap())
            .unwrap_err();
        assert!(matches!(err, ForecastError::NumericalError(_)));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LagModel::moving_average(0).is_err());
        assert!(LagModel::weighted(vec![]).is_err());
        assert!(LagModel::weighted(vec![1.0, f64::NAN]).is_err());
        assert!(LagModel::weighted(vec![1.0, -1.0]).is_err());
    }

    #[test]
    fn test_negative_weights_allowed() {
        // y_t = 2 * y_{t-1} - y_{t-2} extrapolates a line
        let model = LagModel::weighted(vec![-1.0, 2.0]).unwrap();
        let p = project(&model, &[1.0, 2.0, 3.0], 3);
        assert_close(&p.values, &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_length_always_matches_horizon() {
        let model = LagModel::moving_average(3).unwrap();
        for len in 1..6 {
            let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
            for horizon in [1, 2, 7, 30] {
                let p = project(&model, &values, horizon);
                assert_eq!(p.values.len(), horizon as usize);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let model = LagModel::weighted(vec![0.1, 0.3, 0.6]).unwrap();
        let a = project(&model, &[3.0, 1.0, 4.0, 1.0, 5.0], 10);
        let b = project(&model, &[3.0, 1.0, 4.0, 1.0, 5.0], 10);
        assert_eq!(a, b);
    }
}
