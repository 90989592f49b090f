//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It
//! implements `axum::response::IntoResponse` to produce the service's flat
//! `{"error": message}` JSON body with the appropriate status code.
//!
//! Domain failures from the store (validation, not-found, conflicts, blocked
//! deletions) all map to 400 on API routes; only unmatched routes and
//! missing static files answer 404. This matches the existing API contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use recetario_storage::StoreError;

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request or domain failure (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unmatched route or missing static file (404).
    #[error("{0}")]
    NotFound(String),

    /// Unexpected lower-level fault (500). The detail is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor.".to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(_)
            | StoreError::NotFound(_)
            | StoreError::Conflict(_)
            | StoreError::InUse(_) => ApiError::BadRequest(err.to_string()),
            StoreError::Sqlite(_) | StoreError::Migration(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
