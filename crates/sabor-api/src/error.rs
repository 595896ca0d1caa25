//! Sabor Digital: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use sabor_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration could not be applied.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The outbound HTTP client could not be built.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The tracing exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::Validation(fields) => {
                return (StatusCode::BAD_REQUEST, Json(fields.clone())).into_response();
            }
            DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::InvalidReference { .. } => (StatusCode::NOT_FOUND, "invalid_reference"),
            DomainError::IncompleteBatch { .. } => (StatusCode::NOT_FOUND, "incomplete_batch"),
            DomainError::DependencyUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "dependency_unavailable")
            }
            DomainError::OperationFailed { cause, .. } => {
                error!(%cause, "request failed in the store");
                (StatusCode::INTERNAL_SERVER_ERROR, "operation_failed")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
            status: status.as_u16(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}
