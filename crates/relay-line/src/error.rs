//! Error types for the relay-line crate.

use thiserror::Error;

/// Errors from webhook handling and the messaging API.
#[derive(Debug, Error)]
pub enum LineError {
    /// The webhook signature is missing or does not match the body.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// The webhook body is not a valid event payload.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The messaging API did not answer within the configured timeout.
    #[error("request to {endpoint} timed out")]
    Timeout {
        /// The API path that timed out.
        endpoint: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("http error on {endpoint}: {reason}")]
    Http {
        /// The API path being called.
        endpoint: String,
        /// The transport error.
        reason: String,
    },

    /// The messaging API answered with a non-success status.
    #[error("messaging api returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the API.
        body: String,
    },

    /// The client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LineError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

/// Result type for LINE operations.
pub type Result<T> = std::result::Result<T, LineError>;
