//! Registration and lookup error types.

use thiserror::Error;
use tyreg_core::CoreError;

/// Errors from annotation processing and registry queries.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested type id was not found in the registry.
    #[error("Type not found: {0}")]
    NotFound(String),

    /// A type id was finalized twice under the `reject` policy.
    #[error("Type {0} is already registered")]
    DuplicateRegistration(String),

    /// A property name was recorded twice for one type under the `reject` policy.
    #[error("Property {property} is already declared on type {type_id}")]
    DuplicateProperty { type_id: String, property: String },

    /// A field's type was omitted and could not be introspected under the `reject` policy.
    #[error("Cannot resolve the declared type of {type_id}.{field}")]
    UnresolvableType { type_id: String, field: String },

    /// An extension references a supertype that is not registered.
    #[error("Type {id} extends unregistered type {supertype}")]
    UnknownSupertype { id: String, supertype: String },

    /// Following `supertype` references looped back on itself.
    #[error("Inheritance cycle: {}", .chain.join(" -> "))]
    InheritanceCycle {
        /// Type ids in walk order, ending with the repeated id.
        chain: Vec<String>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
