// src/web/error.rs
// Error responses for the HTTP API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::{error, warn};

use crate::error::AssistError;
use crate::http::ErrorPayload;

/// API error rendered as `{error, message}`
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: "bad_request".to_string(),
        }
    }

    /// The agent or one of its upstreams failed
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_GATEWAY,
            error_code: "agent_error".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: "internal_error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorPayload::new(self.error_code, self.message);
        (self.status_code, Json(body)).into_response()
    }
}

impl From<AssistError> for ApiError {
    fn from(err: AssistError) -> Self {
        match err {
            AssistError::InvalidInput(msg) => {
                warn!(error = %msg, "Rejected request");
                ApiError::bad_request(msg)
            }
            e if e.is_upstream() => {
                error!(error = %e, "Agent run failed");
                ApiError::bad_gateway(e.to_string())
            }
            e => {
                error!(error = %e, "Internal error");
                ApiError::internal(e.to_string())
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
