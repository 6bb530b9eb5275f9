//! API error types with HTTP response mapping.
//!
//! Error responses carry an empty JSON object body. The detail is logged
//! server-side and never echoed back to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use idempotency::IdempotencyError;

use crate::features::ConfigurationError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request body, header, or field failed validation.
    Validation(String),
    /// Resource not found.
    NotFound,
    /// A duplicate request is still in flight.
    ConflictPending,
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(detail) => {
                tracing::warn!(error = %detail, "request failed validation");
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ConflictPending => {
                tracing::warn!("duplicate request still in flight");
                StatusCode::CONFLICT
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, axum::Json(serde_json::json!({}))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) | DomainError::InvalidKey => {
                ApiError::Validation(err.to_string())
            }
            DomainError::Store(_) | DomainError::Publish(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<IdempotencyError<DomainError>> for ApiError {
    fn from(err: IdempotencyError<DomainError>) -> Self {
        match err {
            IdempotencyError::Pending => ApiError::ConflictPending,
            IdempotencyError::Operation(inner) => inner.into(),
            IdempotencyError::Store(_) | IdempotencyError::Serialization(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<ConfigurationError> for ApiError {
    fn from(err: ConfigurationError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
