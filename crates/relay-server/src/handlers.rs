//! HTTP request handlers for the relay.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use relay_line::{SIGNATURE_HEADER, WebhookPayload};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{RelayError, RelayResult};
use crate::fanout::AlertPayload;
use crate::state::AppState;

/// Liveness text served at `/`.
pub const HOME_TEXT: &str = "LINE Bot 運行中！";

/// Successful `/alert` response.
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Number of recipients a push was attempted for.
    pub sent_to: usize,
}

/// Handle GET / - liveness check.
pub async fn home() -> &'static str {
    HOME_TEXT
}

/// Handle POST /callback - LINE webhook.
///
/// The signature is checked against the raw body before anything is parsed.
/// Text message events are routed in order; their replies go out together.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> RelayResult<&'static str> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    state
        .verifier()
        .verify(&body, signature)
        .map_err(|_| RelayError::InvalidSignature)?;

    let payload =
        WebhookPayload::from_slice(&body).map_err(|e| RelayError::InvalidPayload(e.to_string()))?;
    debug!(events = payload.events.len(), "webhook received");

    state.handle_messages(payload.into_text_messages()).await;

    Ok("OK")
}

/// Handle POST /alert - broadcast a fall alert.
///
/// `sent_to` counts attempted pushes, including ones that failed.
pub async fn alert(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> RelayResult<Json<AlertResponse>> {
    let payload = AlertPayload::from_slice(&body)?;
    info!(
        timestamp = %payload.timestamp_text(),
        confidence = %payload.confidence_text(),
        "alert received"
    );

    // A panicking transport must not take the connection down with it.
    let report = tokio::spawn(async move { state.broadcast(&payload).await })
        .await
        .map_err(|e| RelayError::Internal(format!("alert fanout task failed: {e}")))?;

    Ok(Json(AlertResponse {
        status: "success",
        sent_to: report.attempted,
    }))
}
