//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use registro_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Status code and machine-readable code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::DuplicateKey => (StatusCode::BAD_REQUEST, "DUPLICATE_KEY"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conversion => (StatusCode::INTERNAL_SERVER_ERROR, "CONVERSION_ERROR"),
        ErrorKind::Store => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        ErrorKind::Configuration | ErrorKind::Serialization | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let (status, code) = status_for(error.kind);
        if status.is_server_error() {
            tracing::error!(kind = %error.kind, error = %error.message, "Request failed");
        }

        let body = ApiErrorResponse {
            error: code.to_string(),
            message: error.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Handler error wrapper; any `AppError` converts into it with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

/// Result type returned by handlers.
pub type ApiResult<T> = Result<T, ApiError>;
