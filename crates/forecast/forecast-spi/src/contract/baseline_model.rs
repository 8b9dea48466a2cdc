//! Baseline model trait

use history_spi::History;

use crate::error::Result;
use crate::model::{Horizon, Projection};

/// A deterministic baseline model.
///
/// `project` must be a pure function of the history and the model's own
/// configuration: identical inputs always give identical output, and the
/// returned projection holds exactly `horizon.get()` values.
pub trait BaselineModel: Send + Sync {
    /// Model name, reported in forecast metadata
    fn name(&self) -> &str;

    /// Number of lags the model wants for a full window
    fn order(&self) -> usize;

    /// Project `horizon` future values from `history`
    fn project(&self, history: &History, horizon: Horizon) -> Result<Projection>;
}
