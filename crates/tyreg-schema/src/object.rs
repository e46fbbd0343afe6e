//! Type annotation processing.
//!
//! Finalizes a declared type: reads its own pending properties, classifies
//! it by its explicit `extends` relation, and commits the descriptor to the
//! registry.

use tyreg_core::{DuplicatePolicy, RegistrationPolicy, TypeDescriptor, TypeTarget};

use crate::error::SchemaError;
use crate::pending::PendingStore;
use crate::registry::Registry;

/// Options carried by a type annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Property used to tell polymorphic instances apart. Only persisted on
    /// root objects.
    pub discriminator: Option<String>,
}

impl TypeOptions {
    #[must_use]
    pub fn discriminator(property: impl Into<String>) -> Self {
        Self {
            discriminator: Some(property.into()),
        }
    }
}

pub struct TypeProcessor {
    policy: RegistrationPolicy,
}

impl TypeProcessor {
    #[must_use]
    pub const fn new(policy: RegistrationPolicy) -> Self {
        Self { policy }
    }

    /// Commit `target` to `registry`, replacing any entry with the same id.
    ///
    /// The pending store is only read, so annotating the same target again
    /// produces the same entry.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Core` for an invalid target and, under the
    /// `reject` policy, `SchemaError::DuplicateRegistration` when the id is
    /// already registered.
    pub fn annotate(
        &self,
        pending: &PendingStore,
        registry: &mut Registry,
        target: &TypeTarget,
        options: TypeOptions,
    ) -> Result<TypeDescriptor, SchemaError> {
        tracing::debug!(
            target_type = target.name(),
            extends = ?target.extends(),
            discriminator = ?options.discriminator,
            "annotating type"
        );
        target.validate()?;

        if registry.contains(target.name()) && self.policy.duplicate_types == DuplicatePolicy::Reject
        {
            return Err(SchemaError::DuplicateRegistration(target.name().to_string()));
        }

        let properties = pending.properties(target);
        let descriptor = match target.extends() {
            None => TypeDescriptor::root(
                target.name(),
                properties,
                options.discriminator,
                target.handle(),
            ),
            Some(supertype) => {
                if let Some(discriminator) = options.discriminator {
                    tracing::warn!(
                        target_type = target.name(),
                        supertype,
                        %discriminator,
                        "discriminator ignored on extension type; declare it on the root"
                    );
                }
                TypeDescriptor::extension(target.name(), properties, supertype, target.handle())
            }
        };

        if registry.put(descriptor.clone()).is_some() {
            tracing::warn!(target_type = target.name(), "replaced existing registry entry");
        }

        Ok(descriptor)
    }
}
