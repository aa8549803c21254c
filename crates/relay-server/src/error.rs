//! Error types for the relay server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Result type alias for relay server operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors that can occur in the relay server.
///
/// Contact-list failures never appear here: the command router renders them
/// as reply text and the webhook still answers `200 OK`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The webhook signature is missing or wrong.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// A correctly signed webhook body could not be parsed.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The alert request body is not a JSON object.
    #[error("invalid alert payload: {0}")]
    InvalidAlert(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body returned by `/alert` on failure.
#[derive(Debug, Serialize)]
struct AlertErrorResponse {
    status: &'static str,
    message: &'static str,
}

impl AlertErrorResponse {
    const fn new(message: &'static str) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSignature => (StatusCode::BAD_REQUEST, "Invalid signature").into_response(),
            Self::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "Invalid payload").into_response(),
            Self::InvalidAlert(_) => {
                warn!(error = %self, "rejected alert");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AlertErrorResponse::new("invalid alert payload")),
                )
                    .into_response()
            }
            Self::Config(_) | Self::BindFailed(_, _) | Self::Internal(_) => {
                // Details stay in the log; callers get a generic message.
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AlertErrorResponse::new("internal error")),
                )
                    .into_response()
            }
        }
    }
}
