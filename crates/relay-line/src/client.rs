//! HTTP implementation of [`MessagingClient`] for the LINE Messaging API.

use std::fmt;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LineError, Result};
use crate::messaging::{
    MessagingClient, PushMessageRequest, ReplyMessageRequest, ReplyToken, TextMessage,
};

/// Production base URL of the Messaging API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

const PUSH_PATH: &str = "/v2/bot/message/push";
const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Configuration for [`HttpMessagingClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing path.
    pub base_url: String,
    /// Channel access token sent as a bearer token.
    pub access_token: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for the production API with a 10 second timeout.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Messaging API client over HTTPS.
#[derive(Clone)]
pub struct HttpMessagingClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl fmt::Debug for HttpMessagingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMessagingClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpMessagingClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LineError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LineError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        })
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> Result<()> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, &e))?;

        let status = response.status();
        if status.is_success() {
            debug!(endpoint = path, status = status.as_u16(), "messaging api call succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(endpoint = path, status = status.as_u16(), "messaging api call rejected");
        Err(LineError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_error(path: &str, err: &reqwest::Error) -> LineError {
    if err.is_timeout() {
        LineError::Timeout {
            endpoint: path.to_string(),
        }
    } else {
        LineError::Http {
            endpoint: path.to_string(),
            reason: err.to_string(),
        }
    }
}

impl MessagingClient for HttpMessagingClient {
    fn push<'a>(&'a self, to: &'a str, messages: Vec<TextMessage>) -> BoxFuture<'a, Result<()>> {
        async move {
            let request = PushMessageRequest {
                to,
                messages: &messages,
            };
            self.post_json(PUSH_PATH, &request).await
        }
        .boxed()
    }

    fn reply(&self, token: ReplyToken, messages: Vec<TextMessage>) -> BoxFuture<'_, Result<()>> {
        async move {
            let request = ReplyMessageRequest {
                reply_token: token.as_str(),
                messages: &messages,
            };
            self.post_json(REPLY_PATH, &request).await
        }
        .boxed()
    }
}
