//! Alert payloads and best-effort broadcast to recipients.

use futures::future::join_all;
use relay_contacts::RecipientId;
use relay_line::{MessagingClient, TextMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{RelayError, RelayResult};

/// Body of a `POST /alert` request from the fall detector.
///
/// Both fields are free-form: whatever scalar the detector sends is rendered
/// into the notification as-is, and missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AlertPayload {
    /// When the fall was detected, as formatted by the detector.
    #[serde(default)]
    pub timestamp: Option<Value>,
    /// Detector confidence in percent, nominally 0 to 100.
    #[serde(default)]
    pub confidence: Option<Value>,
}

/// Renders a JSON value the way it should read in a chat message.
fn render(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl AlertPayload {
    /// Parses a request body.
    ///
    /// An out-of-range or non-numeric confidence is logged but still relayed.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::InvalidAlert` if the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> RelayResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| RelayError::InvalidAlert(e.to_string()))?;
        if !value.is_object() {
            return Err(RelayError::InvalidAlert("body is not a JSON object".to_string()));
        }
        let payload: Self =
            serde_json::from_value(value).map_err(|e| RelayError::InvalidAlert(e.to_string()))?;

        if let Some(confidence) = &payload.confidence {
            let numeric = match confidence {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match numeric {
                Some(c) if (0.0..=100.0).contains(&c) => {}
                Some(c) => warn!(confidence = c, "alert confidence outside 0..=100"),
                None if confidence.is_null() => {}
                None => warn!(confidence = %confidence, "alert confidence is not numeric"),
            }
        }

        Ok(payload)
    }

    /// Timestamp as shown in the notification; empty when absent.
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        render(self.timestamp.as_ref(), "")
    }

    /// Confidence as shown in the notification; `0` when absent.
    #[must_use]
    pub fn confidence_text(&self) -> String {
        render(self.confidence.as_ref(), "0")
    }

    /// Renders the notification text pushed to every recipient.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "⚠️ 緊急警報！\n偵測到摔倒事件\n信心度: {}%\n時間: {}",
            self.confidence_text(),
            self.timestamp_text()
        )
    }
}

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FanoutReport {
    /// Recipients a push was attempted for.
    pub attempted: usize,
    /// Recipients the API accepted the push for.
    pub delivered: usize,
}

impl FanoutReport {
    /// Recipients whose push failed.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Pushes `text` to every recipient independently.
///
/// Pushes run concurrently; each one is bounded by the client's request
/// timeout. A failed push is logged and does not affect the others.
pub async fn fan_out(
    messaging: &dyn MessagingClient,
    recipients: &[RecipientId],
    text: &str,
) -> FanoutReport {
    let pushes = recipients.iter().map(|recipient| async move {
        match messaging
            .push(recipient.as_str(), vec![TextMessage::new(text)])
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(recipient = %recipient, error = %e, "failed to push alert");
                false
            }
        }
    });

    let results = join_all(pushes).await;
    let report = FanoutReport {
        attempted: results.len(),
        delivered: results.into_iter().filter(|ok| *ok).count(),
    };

    info!(
        attempted = report.attempted,
        delivered = report.delivered,
        failed = report.failed(),
        "alert fanout complete"
    );
    report
}
