//! Outbound message types and the messaging client trait.

use std::fmt;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Single-use token for replying to one webhook event.
///
/// The token is neither `Clone` nor `Copy`: [`MessagingClient::reply`] takes
/// it by value, so each inbound event can be replied to at most once.
#[derive(Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReplyToken(String);

impl ReplyToken {
    /// Wraps a raw reply token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReplyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReplyToken").field(&"<redacted>").finish()
    }
}

/// A text message object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextMessage {
    /// Message body.
    pub text: String,
}

impl TextMessage {
    /// Creates a text message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Body of a push message request.
#[derive(Debug, Serialize)]
pub struct PushMessageRequest<'a> {
    /// Recipient user ID.
    pub to: &'a str,
    /// Messages to deliver.
    pub messages: &'a [TextMessage],
}

/// Body of a reply message request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest<'a> {
    /// Token of the event being replied to.
    pub reply_token: &'a str,
    /// Messages to deliver.
    pub messages: &'a [TextMessage],
}

/// Client for sending messages to LINE users.
///
/// Abstracts the transport so the relay can be exercised with an in-memory
/// fake.
pub trait MessagingClient: Send + Sync + fmt::Debug {
    /// Pushes messages to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered to the API.
    fn push<'a>(&'a self, to: &'a str, messages: Vec<TextMessage>) -> BoxFuture<'a, Result<()>>;

    /// Replies to the event identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply could not be delivered to the API.
    fn reply(&self, token: ReplyToken, messages: Vec<TextMessage>) -> BoxFuture<'_, Result<()>>;
}
