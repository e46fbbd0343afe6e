//! # tyreg-schema
//!
//! Annotation processing and the type registry for tyreg.
//!
//! This crate provides:
//! - `JsonSchemaGenerator`: type name to JSON-Schema fragment
//! - `FieldProcessor` / `TypeProcessor`: the field and type annotation processors
//! - `Registry` / `FrozenRegistry`: finalized type descriptors by id
//! - `Loader`: registration-phase glue, including self-declaring `SchemaObject` types
//! - Supertype resolution and metadata document export for consumers
//!
//! ## Usage
//!
//! ```
//! use tyreg_core::{DeclaredTypes, TypeTarget};
//! use tyreg_schema::{Loader, TypeOptions};
//!
//! struct Animal;
//! struct Dog;
//!
//! let mut loader = Loader::new().with_introspector(
//!     DeclaredTypes::new()
//!         .with::<Animal, String>("name")
//!         .with::<Dog, String>("breed"),
//! );
//!
//! let animal = TypeTarget::of::<Animal>();
//! loader.annotate_field(&animal, "name", None, None)?;
//! loader.annotate_type(&animal, TypeOptions::default())?;
//!
//! let dog = TypeTarget::of::<Dog>().extending("Animal");
//! loader.annotate_field(&dog, "breed", None, None)?;
//! loader.annotate_type(&dog, TypeOptions::default())?;
//!
//! let registry = loader.finish();
//! assert_eq!(registry.get("Dog").and_then(|d| d.supertype()), Some("Animal"));
//! assert_eq!(registry.resolve("Dog")?.properties.len(), 2);
//! # Ok::<(), tyreg_schema::SchemaError>(())
//! ```

mod document;
pub mod error;
pub mod field;
pub mod generator;
pub mod loader;
pub mod object;
pub mod pending;
pub mod registry;
pub mod resolve;

pub use error::SchemaError;
pub use field::{FieldOverrides, FieldProcessor};
pub use generator::{ANY_TYPE, JsonSchemaGenerator, SchemaGenerator};
pub use loader::{Loader, SchemaObject, TypeDeclaration};
pub use object::{TypeOptions, TypeProcessor};
pub use pending::PendingStore;
pub use registry::{FrozenRegistry, Registry};
pub use resolve::ResolvedType;
