//! The administrator-managed contact registry.

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{ContactError, Result};
use crate::recipients::RecipientSet;
use crate::types::{ContactList, RecipientId};

/// Ordered, deduplicated list of alert recipients.
///
/// The administrator identifier is inserted at construction and is always the
/// first entry. Every operation takes the single internal lock for the length
/// of the operation only, so snapshots can be pushed to without holding it.
#[derive(Debug)]
pub struct ContactRegistry {
    admin: RecipientId,
    contacts: RwLock<Vec<RecipientId>>,
}

impl ContactRegistry {
    /// Creates a registry containing only the administrator.
    #[must_use]
    pub fn new(admin: RecipientId) -> Self {
        let contacts = RwLock::new(vec![admin.clone()]);
        Self { admin, contacts }
    }

    /// Returns the administrator identifier.
    #[must_use]
    pub const fn admin(&self) -> &RecipientId {
        &self.admin
    }

    /// Returns the number of registered recipients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    /// Always false; the administrator is always registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.contacts.read().iter().any(|c| c == id)
    }
}

impl RecipientSet for ContactRegistry {
    fn add(&self, id: &str) -> Result<usize> {
        let mut contacts = self.contacts.write();

        if contacts.iter().any(|c| c == id) {
            debug!(recipient = %id, "recipient already registered");
            return Err(ContactError::AlreadyExists { id: id.to_string() });
        }

        let recipient = RecipientId::parse(id)?;
        contacts.push(recipient);
        let count = contacts.len();
        drop(contacts);

        info!(recipient = %id, count, "recipient added");
        Ok(count)
    }

    fn remove(&self, id: &str) -> Result<usize> {
        if self.admin == id {
            return Err(ContactError::ProtectedIdentifier { id: id.to_string() });
        }

        let mut contacts = self.contacts.write();
        let Some(index) = contacts.iter().position(|c| c == id) else {
            return Err(ContactError::NotFound { id: id.to_string() });
        };
        contacts.remove(index);
        let count = contacts.len();
        drop(contacts);

        info!(recipient = %id, count, "recipient removed");
        Ok(count)
    }

    fn list(&self) -> ContactList {
        ContactList::new(self.snapshot())
    }

    fn snapshot(&self) -> Vec<RecipientId> {
        self.contacts.read().clone()
    }
}
