//! Contract module containing trait definitions for forecast operations

mod baseline_model;

pub use baseline_model::BaselineModel;
