//! Error types for the relay-contacts crate.

use thiserror::Error;

/// Errors returned by recipient set operations.
///
/// None of these are fatal: the command router renders each one as a reply
/// message to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// The identifier does not have the LINE user identifier shape.
    #[error("invalid recipient identifier: {id}")]
    InvalidFormat {
        /// The rejected identifier.
        id: String,
    },

    /// The identifier is already registered.
    #[error("recipient already exists: {id}")]
    AlreadyExists {
        /// The duplicate identifier.
        id: String,
    },

    /// The identifier is not registered.
    #[error("recipient not found: {id}")]
    NotFound {
        /// The missing identifier.
        id: String,
    },

    /// The administrator identifier cannot be removed.
    #[error("administrator cannot be removed: {id}")]
    ProtectedIdentifier {
        /// The administrator identifier.
        id: String,
    },

    /// The recipient set is fixed by configuration.
    #[error("recipient set is read-only")]
    ReadOnly,
}

/// Result type for recipient set operations.
pub type Result<T> = std::result::Result<T, ContactError>;
