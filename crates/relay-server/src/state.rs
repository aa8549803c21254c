//! Shared state for the relay server.

use std::sync::Arc;

use futures::future::join_all;
use relay_contacts::{ContactRegistry, RecipientId, RecipientSet, StaticRecipients};
use relay_line::{
    ClientConfig, HttpMessagingClient, MessagingClient, SignatureVerifier, TextMessage,
    TextMessageEvent,
};
use tracing::{debug, warn};

use crate::command::CommandRouter;
use crate::config::{RecipientConfig, RelayConfig};
use crate::error::{RelayError, RelayResult};
use crate::fanout::{AlertPayload, FanoutReport, fan_out};

/// Shared state for the relay server.
///
/// Handlers receive it as `State<Arc<AppState>>`; the recipient set inside is
/// the only mutable state and carries its own lock.
#[derive(Debug)]
pub struct AppState {
    /// Administrator identifier.
    admin: RecipientId,
    /// Alert recipients.
    recipients: Arc<dyn RecipientSet>,
    /// Webhook signature verifier.
    verifier: SignatureVerifier,
    /// Outbound push/reply transport.
    messaging: Arc<dyn MessagingClient>,
}

impl AppState {
    /// Create a new state from its parts.
    pub fn new(
        admin: RecipientId,
        recipients: Arc<dyn RecipientSet>,
        verifier: SignatureVerifier,
        messaging: Arc<dyn MessagingClient>,
    ) -> Self {
        Self {
            admin,
            recipients,
            verifier,
            messaging,
        }
    }

    /// Create the production state: HTTP messaging client and the configured
    /// recipient set.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Config` if the messaging client cannot be built.
    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        let client_config = ClientConfig::new(config.access_token.clone())
            .with_base_url(config.api_base_url.clone())
            .with_timeout(config.request_timeout);
        let messaging =
            HttpMessagingClient::new(client_config).map_err(|e| RelayError::Config(e.to_string()))?;

        let recipients: Arc<dyn RecipientSet> = match &config.recipients {
            RecipientConfig::Registry => Arc::new(ContactRegistry::new(config.admin.clone())),
            RecipientConfig::Single(recipient) => Arc::new(StaticRecipients::new(recipient.clone())),
        };

        Ok(Self::new(
            config.admin.clone(),
            recipients,
            SignatureVerifier::new(config.channel_secret.clone()),
            Arc::new(messaging),
        ))
    }

    /// Get the administrator identifier.
    #[must_use]
    pub const fn admin(&self) -> &RecipientId {
        &self.admin
    }

    /// Get the recipient set.
    #[must_use]
    pub fn recipients(&self) -> Arc<dyn RecipientSet> {
        self.recipients.clone()
    }

    /// Get the webhook signature verifier.
    #[must_use]
    pub const fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    /// Get a command router over this state's recipients.
    #[must_use]
    pub fn command_router(&self) -> CommandRouter<'_> {
        CommandRouter::new(&self.admin, self.recipients.as_ref())
    }

    /// Route one text message and reply to it.
    ///
    /// The event's reply token is consumed here. Reply failures are logged.
    pub async fn handle_message(&self, event: TextMessageEvent) {
        self.handle_messages(std::iter::once(event)).await;
    }

    /// Route a batch of text messages, then send their replies concurrently.
    ///
    /// Commands run in delivery order; only the replies overlap. Events
    /// without a reply token still run their command but get no reply.
    pub async fn handle_messages(&self, events: impl IntoIterator<Item = TextMessageEvent>) {
        let router = self.command_router();
        let replies: Vec<_> = events
            .into_iter()
            .filter_map(|event| {
                let reply = router.handle(event.sender.as_deref(), &event.text);
                match event.reply_token {
                    Some(token) => Some((event.sender, token, reply)),
                    None => {
                        debug!(sender = ?event.sender, "message has no reply token; not replying");
                        None
                    }
                }
            })
            .collect();

        join_all(replies.into_iter().map(|(sender, token, reply)| async move {
            debug!(sender = ?sender, "replying to message");
            if let Err(e) = self.messaging.reply(token, vec![TextMessage::new(reply)]).await {
                warn!(sender = ?sender, error = %e, "failed to send reply");
            }
        }))
        .await;
    }

    /// Push an alert to the current recipients.
    pub async fn broadcast(&self, alert: &AlertPayload) -> FanoutReport {
        let recipients = self.recipients.snapshot();
        fan_out(self.messaging.as_ref(), &recipients, &alert.message()).await
    }
}
