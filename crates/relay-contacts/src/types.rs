//! Recipient identifier and list rendering types.

use std::fmt;

use crate::error::{ContactError, Result};

/// First character of every LINE user identifier.
pub const RECIPIENT_ID_PREFIX: char = 'U';

/// Length in characters of a LINE user identifier.
pub const RECIPIENT_ID_LEN: usize = 33;

/// Opaque identifier of a LINE user, used as a push or reply target.
///
/// [`RecipientId::new`] wraps any string (the administrator comes from
/// configuration and is trusted as-is); [`RecipientId::parse`] additionally
/// enforces the platform shape and is what administrator commands go through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipientId(String);

impl RecipientId {
    /// Wraps an identifier without validating its shape.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an identifier, requiring the LINE user identifier shape.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::InvalidFormat` unless the identifier starts with
    /// [`RECIPIENT_ID_PREFIX`] and is exactly [`RECIPIENT_ID_LEN`] characters.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if Self::is_well_formed(&id) {
            Ok(Self(id))
        } else {
            Err(ContactError::InvalidFormat { id })
        }
    }

    /// Returns true if `id` has the LINE user identifier shape.
    #[must_use]
    pub fn is_well_formed(id: &str) -> bool {
        id.starts_with(RECIPIENT_ID_PREFIX) && id.chars().count() == RECIPIENT_ID_LEN
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecipientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecipientId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecipientId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A point-in-time copy of a recipient set, rendered 1-indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactList {
    entries: Vec<RecipientId>,
}

impl ContactList {
    /// Creates a list from entries in display order.
    #[must_use]
    pub const fn new(entries: Vec<RecipientId>) -> Self {
        Self { entries }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[RecipientId] {
        &self.entries
    }
}

impl fmt::Display for ContactList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {id}", i + 1)?;
        }
        Ok(())
    }
}
