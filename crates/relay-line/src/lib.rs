//! LINE Messaging API plumbing for the alert relay.
//!
//! This crate covers the three pieces of the platform the relay talks to:
//!
//! - **Webhook signatures**: [`SignatureVerifier`] checks the
//!   `X-Line-Signature` header (base64 HMAC-SHA256 of the raw body)
//! - **Webhook events**: [`WebhookPayload`] and friends deserialize the
//!   callback body; only text message events carry data the relay uses
//! - **Outbound messages**: the [`MessagingClient`] trait with push and reply,
//!   implemented over HTTP by [`HttpMessagingClient`]
//!
//! # Example
//!
//! ```rust
//! use relay_line::{SignatureVerifier, WebhookPayload};
//!
//! let verifier = SignatureVerifier::new("channel-secret");
//! let body = br#"{"destination":"Ubot","events":[]}"#;
//! let signature = verifier.sign(body).unwrap();
//!
//! verifier.verify(body, &signature).unwrap();
//! let payload = WebhookPayload::from_slice(body).unwrap();
//! assert!(payload.events.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod error;
pub mod messaging;
pub mod signature;
pub mod webhook;

pub use client::{ClientConfig, DEFAULT_API_BASE_URL, HttpMessagingClient};
pub use error::{LineError, Result};
pub use messaging::{MessagingClient, PushMessageRequest, ReplyMessageRequest, ReplyToken, TextMessage};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier};
pub use webhook::{EventSource, MessageContent, MessageEvent, TextMessageEvent, WebhookEvent, WebhookPayload};
