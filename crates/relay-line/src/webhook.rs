//! Webhook event model.
//!
//! Only the parts of the LINE callback payload the relay acts on are modeled.
//! Unknown event and message types deserialize to `Other` and are skipped.

use serde::Deserialize;

use crate::error::Result;
use crate::messaging::ReplyToken;

/// Body of a webhook callback.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// User ID of the bot that received the events.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events delivered in this callback.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

impl WebhookPayload {
    /// Parses a verified callback body.
    ///
    /// # Errors
    ///
    /// Returns `LineError::InvalidPayload` if the body is not a valid payload.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Consumes the payload, yielding the text message events it contains.
    pub fn into_text_messages(self) -> impl Iterator<Item = TextMessageEvent> {
        self.events.into_iter().filter_map(WebhookEvent::into_text_message)
    }
}

/// A single webhook event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    /// A user sent a message.
    Message(MessageEvent),
    /// Any event type the relay does not handle (follow, postback, ...).
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// Returns the text message carried by this event, if any.
    pub fn into_text_message(self) -> Option<TextMessageEvent> {
        match self {
            Self::Message(event) => event.into_text_message(),
            Self::Other => None,
        }
    }
}

/// A message event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Token for replying to this event; absent for channels in standby mode.
    #[serde(default)]
    pub reply_token: Option<ReplyToken>,
    /// Where the message came from.
    pub source: EventSource,
    /// The message itself.
    pub message: MessageContent,
}

impl MessageEvent {
    /// Returns the event as a text message, or `None` for other content.
    pub fn into_text_message(self) -> Option<TextMessageEvent> {
        match self.message {
            MessageContent::Text { text } => Some(TextMessageEvent {
                sender: self.source.user_id().map(str::to_owned),
                text,
                reply_token: self.reply_token,
            }),
            MessageContent::Other => None,
        }
    }
}

/// Origin of an event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum EventSource {
    /// One-to-one chat with a user.
    User {
        /// Sending user.
        user_id: String,
    },
    /// Group chat.
    Group {
        /// Group identifier.
        group_id: String,
        /// Sending user, when the user has consented to sharing it.
        #[serde(default)]
        user_id: Option<String>,
    },
    /// Multi-person chat.
    Room {
        /// Room identifier.
        room_id: String,
        /// Sending user, when available.
        #[serde(default)]
        user_id: Option<String>,
    },
}

impl EventSource {
    /// Returns the sending user, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
        }
    }
}

/// Content of a message event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    /// Plain text.
    Text {
        /// The message text.
        text: String,
    },
    /// Stickers, images, locations and other non-text content.
    #[serde(other)]
    Other,
}

/// A text message ready to be routed.
#[derive(Debug)]
pub struct TextMessageEvent {
    /// Sending user, if the source exposes one.
    pub sender: Option<String>,
    /// Raw message text.
    pub text: String,
    /// Token for the single reply this event allows, if it allows one.
    pub reply_token: Option<ReplyToken>,
}
