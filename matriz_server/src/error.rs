//! Error responses of the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use matriz_core::MatrizError;
use serde_json::json;

pub const NOT_INITIALIZED_MESSAGE: &str = "Server not initialized properly.";

/// Failure answered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Unusable upload or failed analysis
    BadRequest(String),
    /// The similarity table was never built
    NotInitialized,
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotInitialized | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => write!(f, "{}", msg),
            ApiError::NotInitialized => write!(f, "{}", NOT_INITIALIZED_MESSAGE),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<MatrizError> for ApiError {
    fn from(err: MatrizError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
