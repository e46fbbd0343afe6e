//! Per-type pending property stores.
//!
//! Field annotations accumulate here until their owning type is finalized.
//! Each store is scoped to one exact target; a subtype never sees its
//! parent's pending properties.

use std::collections::HashMap;

use tyreg_core::{ConstructorHandle, Properties, PropertyDescriptor, TypeTarget};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PendingKey {
    handle: ConstructorHandle,
    name: String,
}

impl PendingKey {
    fn of(target: &TypeTarget) -> Self {
        Self {
            handle: target.handle(),
            name: target.name().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PendingStore {
    stores: HashMap<PendingKey, Properties>,
}

impl PendingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one property into the target's store, replacing an earlier
    /// property of the same name. Returns the replaced property.
    pub fn record(
        &mut self,
        target: &TypeTarget,
        property: PropertyDescriptor,
    ) -> Option<PropertyDescriptor> {
        self.stores
            .entry(PendingKey::of(target))
            .or_default()
            .insert(property.name.clone(), property)
    }

    #[must_use]
    pub fn contains(&self, target: &TypeTarget, name: &str) -> bool {
        self.stores
            .get(&PendingKey::of(target))
            .is_some_and(|props| props.contains_key(name))
    }

    /// Properties recorded for exactly this target; empty when none were.
    #[must_use]
    pub fn properties(&self, target: &TypeTarget) -> Properties {
        self.stores
            .get(&PendingKey::of(target))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of targets with at least one recorded property.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
