//! services/gateway/src/error.rs
//!
//! Defines the error types of the gateway service.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// The primary error type for starting and running the `gateway` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Failure while relaying one request to the backend.
///
/// Every variant is reported to the caller as the same generic 500 body.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request body is not valid JSON: {0}")]
    InvalidBody(serde_json::Error),

    #[error("Backend replied with a non-JSON body: {0}")]
    InvalidResponse(serde_json::Error),

    #[error("Could not build the backend URL: {0}")]
    Url(String),
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        error!("Proxy error: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": INTERNAL_ERROR_MESSAGE })),
        )
            .into_response()
    }
}
