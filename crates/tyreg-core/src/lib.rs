//! # tyreg-core
//!
//! Core types, introspection capability, and error types for tyreg.
//!
//! This crate provides the foundational types shared across all tyreg crates:
//! - Property and type descriptors as they live in the registry
//! - The declared type target (name, Rust handle, explicit `extends`)
//! - The `TypeIntrospector` capability used when a field omits its type
//! - Registration policies for duplicate and unresolvable declarations
//! - Cross-cutting error types

pub mod errors;
pub mod introspect;
pub mod model;
pub mod policy;

pub use errors::CoreError;
pub use introspect::{DeclaredType, DeclaredTypes, NoIntrospection, TypeIntrospector, TypeNameLike};
pub use model::{
    ConstructorHandle, Properties, PropertyDescriptor, SchemaFragment, TypeDescriptor, TypeKind,
    TypeTarget,
};
pub use policy::{DuplicatePolicy, RegistrationPolicy, UnresolvedPolicy};
