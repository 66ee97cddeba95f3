//! API error type and response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-facing API errors. Every failure in this service is a
/// synchronous 4xx detected before any mutation; no 5xx path exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed, missing, or illegal field values, or an illegal
    /// status transition. 400.
    #[error("{0}")]
    Validation(String),

    /// Id mismatch between the request body and the route. 400.
    #[error("{0}")]
    Conflict(String),

    /// The referenced record does not exist. 404.
    #[error("{0}")]
    NotFound(String),

    /// Unsupported verb on a known route. 405.
    #[error("{0}")]
    MethodNotAllowed(String),
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// Error body sent to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
