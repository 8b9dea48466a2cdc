//! API route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use forecast_facade::{ForecastRequest, ForecastVector, Horizon, VarianceReport, VarianceRequest};
use history_facade::{History, SeriesKey};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

pub const SERVICE_NAME: &str = "baseline-forecaster";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
    pub model: String,
    pub order: usize,
    pub max_horizon: usize,
    pub checks: Vec<CheckResult>,
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe - can the store be read and does the model project?
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let forecaster = &state.forecaster;
    let checks = vec![probe_store(&state).await, probe_model(&state)];
    let ready = checks.iter().all(|c| c.healthy);

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "unavailable" },
            version: env!("CARGO_PKG_VERSION"),
            store: state.store_kind,
            model: forecaster.model().name().to_string(),
            order: forecaster.model().order(),
            max_horizon: forecaster.max_horizon(),
            checks,
        }),
    )
}

async fn probe_store(state: &AppState) -> CheckResult {
    let result = match SeriesKey::scope("readiness-probe") {
        Ok(key) => state
            .forecaster
            .store()
            .observations(&key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    CheckResult {
        name: "history_store",
        healthy: result.is_ok(),
        message: result.err(),
    }
}

fn probe_model(state: &AppState) -> CheckResult {
    let result = History::from_values(1, &[1.0, 2.0, 3.0])
        .map_err(|e| e.to_string())
        .and_then(|history| {
            let horizon = Horizon::new(1).map_err(|e| e.to_string())?;
            state
                .forecaster
                .forecast_history(&history, horizon)
                .map_err(|e| e.to_string())
        });
    CheckResult {
        name: "baseline_model",
        healthy: result.is_ok(),
        message: result.err(),
    }
}

/// Auto-baseline forecast for one series.
pub async fn forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<ForecastVector>, ApiError> {
    let Json(request) = payload?;
    let key = request.series_key()?;
    let forecast = state
        .forecaster
        .forecast(&key, request.horizon_periods)
        .await?;
    Ok(Json(forecast))
}

/// Period-aligned variance between two series.
pub async fn variance(
    State(state): State<AppState>,
    payload: Result<Json<VarianceRequest>, JsonRejection>,
) -> Result<Json<VarianceReport>, ApiError> {
    let Json(request) = payload?;
    request
        .config
        .validate()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let base = request.base.series_key()?;
    let compare = request.compare.series_key()?;
    let report = state
        .forecaster
        .variance(&base, &compare, &request.config)
        .await?;
    Ok(Json(report))
}
