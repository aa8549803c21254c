//! Alert recipient registry for the LINE alert relay.
//!
//! `relay-contacts` owns the list of LINE users that receive alert
//! notifications. The list is seeded with the administrator identifier,
//! which can never be removed, and is mutated only through administrator
//! commands for the lifetime of the process.
//!
//! # Recipient sets
//!
//! Alert fanout reads recipients through the [`RecipientSet`] trait, which has
//! two configurations:
//!
//! - [`ContactRegistry`]: the dynamic, administrator-managed list
//! - [`StaticRecipients`]: a single fixed recipient that rejects mutation
//!
//! # Example
//!
//! ```rust
//! use relay_contacts::{ContactError, ContactRegistry, RecipientId, RecipientSet};
//!
//! let admin = RecipientId::new(format!("U{}", "a".repeat(32)));
//! let registry = ContactRegistry::new(admin.clone());
//!
//! let family = format!("U{}", "b".repeat(32));
//! assert_eq!(registry.add(&family).unwrap(), 2);
//! assert!(matches!(registry.add(&family), Err(ContactError::AlreadyExists { .. })));
//!
//! // The administrator is protected.
//! assert!(matches!(
//!     registry.remove(admin.as_str()),
//!     Err(ContactError::ProtectedIdentifier { .. })
//! ));
//!
//! println!("{}", registry.list());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod recipients;
pub mod registry;
pub mod types;

// Re-export main types at crate root
pub use error::{ContactError, Result};
pub use recipients::{RecipientSet, StaticRecipients};
pub use registry::ContactRegistry;
pub use types::{ContactList, RECIPIENT_ID_LEN, RECIPIENT_ID_PREFIX, RecipientId};
