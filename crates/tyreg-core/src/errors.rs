//! Cross-cutting error types for tyreg.
//!
//! Registration errors (duplicates, unresolvable types, broken supertype
//! chains) are defined in `tyreg-schema`. This module only covers failures
//! of the core data model itself.

use thiserror::Error;

/// Errors that can be raised by the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A type or property identifier was empty or otherwise unusable.
    #[error("Invalid identifier for {what}: {value:?}")]
    InvalidIdentifier { what: &'static str, value: String },

    /// A type declared itself as its own supertype.
    #[error("Type {0} cannot extend itself")]
    SelfExtension(String),
}
