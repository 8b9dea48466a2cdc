//! HTTP error mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use forecast_facade::{ErrorKind, ForecastError};
use serde::Serialize;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Forecast(e) => e.kind().as_str(),
            ApiError::InvalidRequest(_) => "InvalidRequest",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forecast(e) => match e.kind() {
                ErrorKind::InvalidHorizon | ErrorKind::InvalidKey => StatusCode::BAD_REQUEST,
                ErrorKind::SeriesNotFound => StatusCode::NOT_FOUND,
                ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::CorruptHistory
                | ErrorKind::InvalidParameter
                | ErrorKind::NumericalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Forecast(e) if e.kind().is_retryable())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            kind: self.kind(),
            message: self.to_string(),
        };
        let mut response = (status, Json(body)).into_response();
        if self.is_retryable() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ForecastError::InvalidHorizon {
                    requested: 0,
                    max: 1024,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ForecastError::SeriesNotFound {
                    series: "acme".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ForecastError::StoreUnavailable("down".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ForecastError::NumericalError("inf".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }

    #[test]
    fn test_retry_after_only_when_retryable() {
        let response =
            ApiError::from(ForecastError::StoreUnavailable("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "1");

        let response = ApiError::InvalidRequest("bad".to_string()).into_response();
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
