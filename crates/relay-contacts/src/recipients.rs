//! The recipient set abstraction used by alert fanout.
//!
//! A deployment either manages its recipients at runtime ([`ContactRegistry`])
//! or pins alerts to one configured user ([`StaticRecipients`]). Both are
//! served through [`RecipientSet`] so the router and fanout have one code path.
//!
//! [`ContactRegistry`]: crate::ContactRegistry

use std::fmt;

use crate::error::{ContactError, Result};
use crate::types::{ContactList, RecipientId};

/// A set of alert recipients.
pub trait RecipientSet: Send + Sync + fmt::Debug {
    /// Adds a recipient and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists`, `InvalidFormat`, or `ReadOnly`.
    fn add(&self, id: &str) -> Result<usize>;

    /// Removes a recipient and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `ProtectedIdentifier`, `NotFound`, or `ReadOnly`.
    fn remove(&self, id: &str) -> Result<usize>;

    /// Returns the current recipients for display.
    fn list(&self) -> ContactList;

    /// Returns a copy of the current recipients.
    fn snapshot(&self) -> Vec<RecipientId>;
}

/// A fixed single-recipient set.
#[derive(Debug, Clone)]
pub struct StaticRecipients {
    recipient: RecipientId,
}

impl StaticRecipients {
    /// Creates a set that always contains exactly `recipient`.
    #[must_use]
    pub const fn new(recipient: RecipientId) -> Self {
        Self { recipient }
    }

    /// Returns the configured recipient.
    #[must_use]
    pub const fn recipient(&self) -> &RecipientId {
        &self.recipient
    }
}

impl RecipientSet for StaticRecipients {
    fn add(&self, _id: &str) -> Result<usize> {
        Err(ContactError::ReadOnly)
    }

    fn remove(&self, _id: &str) -> Result<usize> {
        Err(ContactError::ReadOnly)
    }

    fn list(&self) -> ContactList {
        ContactList::new(self.snapshot())
    }

    fn snapshot(&self) -> Vec<RecipientId> {
        vec![self.recipient.clone()]
    }
}
