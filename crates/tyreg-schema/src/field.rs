//! Field annotation processing.
//!
//! Resolves a field's schema property name and type name, generates its
//! fragment, and merges the result into the owning type's pending store.
//! The registry is only read, to refuse fields for an already registered
//! type under the `reject` policy.

use tyreg_core::{
    DuplicatePolicy, PropertyDescriptor, RegistrationPolicy, TypeIntrospector, TypeTarget,
    UnresolvedPolicy,
};

use crate::error::SchemaError;
use crate::generator::{ANY_TYPE, SchemaGenerator};
use crate::pending::PendingStore;
use crate::registry::Registry;

/// Explicit `(name, type)` overrides carried by a field annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldOverrides<'a> {
    pub name: Option<&'a str>,
    pub type_name: Option<&'a str>,
}

impl<'a> FieldOverrides<'a> {
    #[must_use]
    pub const fn new(name: Option<&'a str>, type_name: Option<&'a str>) -> Self {
        Self { name, type_name }
    }

    #[must_use]
    pub const fn explicit(name: &'a str, type_name: &'a str) -> Self {
        Self {
            name: Some(name),
            type_name: Some(type_name),
        }
    }
}

pub struct FieldProcessor<'a> {
    generator: &'a dyn SchemaGenerator,
    introspector: &'a dyn TypeIntrospector,
    policy: RegistrationPolicy,
}

impl<'a> FieldProcessor<'a> {
    #[must_use]
    pub fn new(
        generator: &'a dyn SchemaGenerator,
        introspector: &'a dyn TypeIntrospector,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            generator,
            introspector,
            policy,
        }
    }

    /// Record one field of `target` in its pending store.
    ///
    /// The overrides only apply when both are given. Otherwise the property
    /// is named after `field_key` and typed from the introspector.
    ///
    /// # Errors
    ///
    /// Only under a `reject` policy: `SchemaError::DuplicateRegistration`
    /// when `target` is already in `registry`, `SchemaError::UnresolvableType`
    /// when the introspector cannot type the field, and
    /// `SchemaError::DuplicateProperty` when the property name is already
    /// pending for `target`.
    pub fn annotate(
        &self,
        registry: &Registry,
        pending: &mut PendingStore,
        target: &TypeTarget,
        field_key: &str,
        overrides: FieldOverrides<'_>,
    ) -> Result<PropertyDescriptor, SchemaError> {
        tracing::debug!(
            target_type = target.name(),
            field_key,
            name = ?overrides.name,
            type_name = ?overrides.type_name,
            "annotating field"
        );

        let registered = registry.contains(target.name());
        if registered && self.policy.duplicate_types == DuplicatePolicy::Reject {
            return Err(SchemaError::DuplicateRegistration(target.name().to_string()));
        }

        let (name, type_name) = match (overrides.name, overrides.type_name) {
            (Some(name), Some(type_name)) => (name.to_string(), type_name.to_string()),
            _ => (field_key.to_string(), self.declared_type(target, field_key)?),
        };

        if self.policy.duplicate_fields == DuplicatePolicy::Reject && pending.contains(target, &name)
        {
            return Err(SchemaError::DuplicateProperty {
                type_id: target.name().to_string(),
                property: name,
            });
        }

        let property = PropertyDescriptor::new(name, self.generator.generate(&type_name, false));
        if let Some(previous) = pending.record(target, property.clone()) {
            tracing::debug!(
                target_type = target.name(),
                property = %previous.name,
                "replaced pending property"
            );
        }

        Ok(property)
    }

    fn declared_type(&self, target: &TypeTarget, field_key: &str) -> Result<String, SchemaError> {
        if let Some(declared) = self.introspector.declared_type(target, field_key) {
            return Ok(declared.into_type_name());
        }

        match self.policy.unresolved_types {
            UnresolvedPolicy::Fallback => {
                tracing::warn!(
                    target_type = target.name(),
                    field_key,
                    "declared type unknown; falling back to {ANY_TYPE}"
                );
                Ok(ANY_TYPE.to_string())
            }
            UnresolvedPolicy::Reject => Err(SchemaError::UnresolvableType {
                type_id: target.name().to_string(),
                field: field_key.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::JsonSchemaGenerator;
    use pretty_assertions::assert_eq;
    use schemars::json_schema;
    use tyreg_core::{DeclaredTypes, NoIntrospection, Properties, TypeDescriptor, TypeNameLike};

    struct Animal;

    fn animal() -> TypeTarget {
        TypeTarget::of::<Animal>()
    }

    fn introspector() -> DeclaredTypes {
        let mut table = DeclaredTypes::new();
        table.insert("Animal", "name", TypeNameLike::literal("string"));
        table.insert("Animal", "owner", TypeNameLike::named("Person"));
        table
    }

    #[test]
    fn explicit_overrides_win() {
        let generator = JsonSchemaGenerator::new();
        let table = introspector();
        let processor = FieldProcessor::new(&generator, &table, RegistrationPolicy::default());
        let mut pending = PendingStore::new();

        let property = processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "name",
                FieldOverrides::explicit("displayName", "number"),
            )
            .unwrap();

        assert_eq!(property.name, "displayName");
        assert_eq!(property.schema, json_schema!({ "type": "number" }));
        assert!(pending.contains(&animal(), "displayName"));
        assert!(!pending.contains(&animal(), "name"));
    }

    #[test]
    fn omitted_type_uses_field_key_and_introspection() {
        let generator = JsonSchemaGenerator::new();
        let table = introspector();
        let processor = FieldProcessor::new(&generator, &table, RegistrationPolicy::default());
        let mut pending = PendingStore::new();

        let property = processor
            .annotate(&Registry::new(), &mut pending, &animal(), "owner", FieldOverrides::default())
            .unwrap();

        assert_eq!(property.name, "owner");
        assert_eq!(property.schema, json_schema!({ "$ref": "Person" }));
    }

    #[test]
    fn partial_overrides_are_ignored() {
        let generator = JsonSchemaGenerator::new();
        let table = introspector();
        let processor = FieldProcessor::new(&generator, &table, RegistrationPolicy::default());
        let mut pending = PendingStore::new();

        let property = processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "name",
                FieldOverrides::new(Some("label"), None),
            )
            .unwrap();

        assert_eq!(property.name, "name");
        assert_eq!(property.schema, json_schema!({ "type": "string" }));
    }

    #[test]
    fn unknown_type_falls_back_to_any() {
        let generator = JsonSchemaGenerator::new();
        let processor =
            FieldProcessor::new(&generator, &NoIntrospection, RegistrationPolicy::default());
        let mut pending = PendingStore::new();

        let property = processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "mystery",
                FieldOverrides::default(),
            )
            .unwrap();

        assert_eq!(property.schema, json_schema!({}));
    }

    #[test]
    fn unknown_type_is_rejected_when_strict() {
        let generator = JsonSchemaGenerator::new();
        let processor =
            FieldProcessor::new(&generator, &NoIntrospection, RegistrationPolicy::strict());
        let mut pending = PendingStore::new();

        let result = processor.annotate(
            &Registry::new(),
            &mut pending,
            &animal(),
            "mystery",
            FieldOverrides::default(),
        );

        assert!(matches!(
            result,
            Err(SchemaError::UnresolvableType { ref type_id, ref field })
                if type_id == "Animal" && field == "mystery"
        ));
        assert!(pending.is_empty());
    }

    #[test]
    fn second_registration_of_a_field_wins() {
        let generator = JsonSchemaGenerator::new();
        let processor =
            FieldProcessor::new(&generator, &NoIntrospection, RegistrationPolicy::default());
        let mut pending = PendingStore::new();

        processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "x",
                FieldOverrides::explicit("x", "string"),
            )
            .unwrap();
        processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "x",
                FieldOverrides::explicit("x", "boolean"),
            )
            .unwrap();

        let props = pending.properties(&animal());
        assert_eq!(props.len(), 1);
        assert_eq!(props["x"].schema, json_schema!({ "type": "boolean" }));
    }

    #[test]
    fn duplicate_field_is_rejected_when_strict() {
        let generator = JsonSchemaGenerator::new();
        let processor =
            FieldProcessor::new(&generator, &NoIntrospection, RegistrationPolicy::strict());
        let mut pending = PendingStore::new();

        processor
            .annotate(
                &Registry::new(),
                &mut pending,
                &animal(),
                "x",
                FieldOverrides::explicit("x", "string"),
            )
            .unwrap();
        let result = processor.annotate(
            &Registry::new(),
            &mut pending,
            &animal(),
            "x",
            FieldOverrides::explicit("x", "boolean"),
        );

        assert!(matches!(result, Err(SchemaError::DuplicateProperty { .. })));
        assert_eq!(
            pending.properties(&animal())["x"].schema,
            json_schema!({ "type": "string" })
        );
    }

    #[test]
    fn field_for_registered_type_is_rejected_when_strict() {
        let generator = JsonSchemaGenerator::new();
        let table = introspector();
        let mut registry = Registry::new();
        registry.put(TypeDescriptor::root(
            "Animal",
            Properties::new(),
            None,
            animal().handle(),
        ));
        let mut pending = PendingStore::new();

        let strict = FieldProcessor::new(&generator, &table, RegistrationPolicy::strict());
        let result =
            strict.annotate(&registry, &mut pending, &animal(), "name", FieldOverrides::default());
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateRegistration(ref id)) if id == "Animal"
        ));
        assert!(pending.is_empty());

        let permissive = FieldProcessor::new(&generator, &table, RegistrationPolicy::default());
        permissive
            .annotate(&registry, &mut pending, &animal(), "name", FieldOverrides::default())
            .unwrap();
        assert!(pending.contains(&animal(), "name"));
    }
}
