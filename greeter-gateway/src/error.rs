//! Error types for the gateway crate.

use std::time::Duration;

use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use greeter_core::CoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// A rule from the core crate rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No route matches the request path.
    #[error("not found: {0}")]
    NotFound(String),

    /// A query or path parameter could not be decoded.
    #[error("invalid request: {0}")]
    InvalidParameter(String),

    /// The `Host` header is missing or not on the allow-list.
    #[error("invalid host header")]
    InvalidHost,

    /// The client exhausted its request budget for the current window.
    #[error("rate limit exceeded")]
    RateLimited { retry_after: Duration },
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::Core(core) => match core {
                CoreError::DangerousInput { .. } | CoreError::InputTooLong { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CoreError::ApiKeyMissing | CoreError::ApiKeyInvalid => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidParameter(_) | GatewayError::InvalidHost => StatusCode::BAD_REQUEST,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({"error": self.to_string()}));
        match self {
            GatewayError::RateLimited { retry_after } => {
                let secs = retry_after.as_secs().max(1).to_string();
                (status, [(RETRY_AFTER, secs)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
