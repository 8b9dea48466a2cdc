//! Raw model output

/// Values produced by a [`BaselineModel`](crate::BaselineModel) before they
/// are attached to a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// One value per horizon step
    pub values: Vec<f64>,
    /// Lags used for the first step (less than the model order in degraded mode)
    pub window: usize,
    /// Steps whose raw prediction was clamped to the observed range
    pub clamped_steps: usize,
}
