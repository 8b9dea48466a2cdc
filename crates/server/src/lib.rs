//! # baseline-server
//!
//! HTTP service for auto-baseline forecasts over keyed, multi-dimensional
//! time series, plus period-aligned variance between two series.

use axum::{
    routing::{get, post},
    Router,
};
use forecast_facade::BaselineForecaster;
use history_facade::open_store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub forecaster: BaselineForecaster,
    pub store_kind: &'static str,
}

impl AppState {
    pub fn new(forecaster: BaselineForecaster, store_kind: &'static str) -> Self {
        Self {
            forecaster,
            store_kind,
        }
    }

    /// Open the configured store and build the forecaster over it.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let store = open_store(&config.store).await?;
        let forecaster = config.forecaster.build(store)?;
        tracing::info!(
            store = config.store.kind(),
            model = forecaster.model().name(),
            order = forecaster.model().order(),
            max_horizon = forecaster.max_horizon(),
            "forecaster ready"
        );
        Ok(Self::new(forecaster, config.store.kind()))
    }
}

/// Build the router with middleware.
pub fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        // API endpoints
        .route("/api/v1/forecast/auto-baseline", post(routes::forecast))
        .route("/api/v1/variance", post(routes::variance))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
