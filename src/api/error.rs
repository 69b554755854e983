//! API error mapping
//!
//! Translates core errors into HTTP responses: invalid input is a 400,
//! storage failures are retryable 503s, everything else is a 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pennywise_core::Error;
use serde::Serialize;
use tracing::error;

/// Error payload returned to API callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub retryable: bool,
}

/// Wrapper turning core errors into HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = ErrorBody {
            error: self.0.to_string(),
            retryable: self.0.is_retryable(),
        };
        (status, Json(body)).into_response()
    }
}
