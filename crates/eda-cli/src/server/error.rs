//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eda::{EdaError, ErrorKind};
use serde::Serialize;
use tracing::warn;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the eda library.
    Eda(EdaError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Eda(e) => match e.kind() {
                ErrorKind::Parse => (StatusCode::BAD_REQUEST, "parse_error"),
                ErrorKind::Schema => (StatusCode::BAD_REQUEST, "schema_error"),
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, "validation_error"),
                ErrorKind::Io => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
            ApiError::Eda(e) => e.to_string(),
        };
        warn!(status = status.as_u16(), error, %message, "request failed");

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<EdaError> for ApiError {
    fn from(err: EdaError) -> Self {
        ApiError::Eda(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Eda(e) => write!(f, "EDA error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
