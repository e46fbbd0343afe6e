//! Registry of finalized type descriptors.
//!
//! A [`Registry`] is populated while types are declared and then frozen into
//! a read-only [`FrozenRegistry`] for consumers. There is no removal.

use std::collections::HashMap;
use std::sync::Arc;

use tyreg_core::TypeDescriptor;

use crate::document;
use crate::error::SchemaError;
use crate::resolve::{self, ResolvedType};

/// Mapping from type id to its descriptor, at most one per id.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    types: HashMap<String, TypeDescriptor>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor under its id. Returns the entry it replaced.
    pub fn put(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.id.clone(), descriptor)
    }

    /// Get a descriptor by id. Returns `None` if not registered.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TypeDescriptor> {
        self.types.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    #[must_use]
    pub const fn all(&self) -> &HashMap<String, TypeDescriptor> {
        &self.types
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// End the registration phase.
    #[must_use]
    pub fn freeze(self) -> FrozenRegistry {
        FrozenRegistry {
            types: Arc::new(self.types),
        }
    }
}

/// Read-only registry shared with consumers.
#[derive(Debug, Clone, Default)]
pub struct FrozenRegistry {
    types: Arc<HashMap<String, TypeDescriptor>>,
}

impl FrozenRegistry {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TypeDescriptor> {
        self.types.get(id)
    }

    #[must_use]
    pub fn all(&self) -> &HashMap<String, TypeDescriptor> {
        &self.types
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.types.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Assemble the full property set of `id` by walking its supertypes.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound`, `SchemaError::UnknownSupertype`, or
    /// `SchemaError::InheritanceCycle`.
    pub fn resolve(&self, id: &str) -> Result<ResolvedType, SchemaError> {
        resolve::resolve(&self.types, id)
    }

    /// Metadata document with every registered type under
    /// `components.schemas`.
    #[must_use]
    pub fn document(&self, ref_prefix: &str) -> serde_json::Value {
        document::document(&self.types, ref_prefix)
    }
}
