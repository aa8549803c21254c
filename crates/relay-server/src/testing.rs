//! In-memory messaging client for tests.

use std::collections::HashSet;
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::BoxFuture;
use relay_line::{LineError, MessagingClient, ReplyToken, TextMessage};

/// Records every push and reply; can be told to fail or panic per recipient.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    pushes: Mutex<Vec<(String, String)>>,
    replies: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes to `id` return an API error.
    pub fn failing_for(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Pushes to `id` panic.
    pub fn panicking_for(mut self, id: impl Into<String>) -> Self {
        self.panicking.insert(id.into());
        self
    }

    /// `(recipient, text)` for every attempted push.
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }

    /// `(reply token, text)` for every reply.
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

fn first_text(messages: &[TextMessage]) -> String {
    messages.first().map(|m| m.text.clone()).unwrap_or_default()
}

impl MessagingClient for RecordingMessenger {
    fn push<'a>(
        &'a self,
        to: &'a str,
        messages: Vec<TextMessage>,
    ) -> BoxFuture<'a, relay_line::Result<()>> {
        async move {
            self.pushes
                .lock()
                .unwrap()
                .push((to.to_string(), first_text(&messages)));

            assert!(!self.panicking.contains(to), "transport exploded for {to}");

            if self.failing.contains(to) {
                return Err(LineError::Api {
                    status: 500,
                    body: "push failed".to_string(),
                });
            }
            Ok(())
        }
        .boxed()
    }

    fn reply(
        &self,
        token: ReplyToken,
        messages: Vec<TextMessage>,
    ) -> BoxFuture<'_, relay_line::Result<()>> {
        async move {
            self.replies
                .lock()
                .unwrap()
                .push((token.as_str().to_string(), first_text(&messages)));
            Ok(())
        }
        .boxed()
    }
}
