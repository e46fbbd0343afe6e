//! Registry data model.
//!
//! A [`TypeDescriptor`] is the finalized description of one declared type.
//! Inheritance is always a by-name reference ([`TypeKind::Extension`]),
//! never a flattened copy of the ancestor's properties.

use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::errors::CoreError;

/// Structural schema of a single property, produced by a schema generator.
pub type SchemaFragment = schemars::Schema;

/// Property descriptors keyed by their schema property name.
pub type Properties = BTreeMap<String, PropertyDescriptor>;

/// One field's contribution to its owning type's schema.
///
/// Serializes as its bare schema fragment; the name is already the key in
/// [`Properties`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub schema: SchemaFragment,
}

impl PropertyDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: SchemaFragment) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

impl Serialize for PropertyDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.schema.serialize(serializer)
    }
}

/// Opaque reference back to the Rust type a descriptor was declared from.
///
/// Consumers use it to find the originating type again; the registry never
/// interprets it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstructorHandle {
    type_id: TypeId,
    type_path: &'static str,
}

impl ConstructorHandle {
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full Rust path of the originating type, e.g. `my_crate::model::Dog`.
    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Originating type with the module path dropped from every segment,
    /// generic arguments included: `app::Wrapper<app::Dog>` becomes
    /// `Wrapper<Dog>`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.type_path.len());
        let mut segment_start = 0;
        for (i, c) in self.type_path.char_indices() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                continue;
            }
            short.push_str(last_segment(&self.type_path[segment_start..i]));
            short.push(c);
            segment_start = i + c.len_utf8();
        }
        short.push_str(last_segment(&self.type_path[segment_start..]));
        short
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl fmt::Debug for ConstructorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorHandle({})", self.type_path)
    }
}

/// A type being declared: its registry id, its Rust handle, and the id of
/// the type it explicitly extends, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTarget {
    name: String,
    handle: ConstructorHandle,
    extends: Option<String>,
}

impl TypeTarget {
    /// Target for `T`, named after [`ConstructorHandle::short_name`].
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        let handle = ConstructorHandle::of::<T>();
        Self {
            name: handle.short_name(),
            handle,
            extends: None,
        }
    }

    /// Target for `T` registered under an explicit id.
    #[must_use]
    pub fn named<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: ConstructorHandle::of::<T>(),
            extends: None,
        }
    }

    /// Declare the registered type this target extends.
    #[must_use]
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn handle(&self) -> ConstructorHandle {
        self.handle
    }

    #[must_use]
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Check that the target can be committed to a registry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` for a blank name or parent,
    /// and `CoreError::SelfExtension` when the target extends itself.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier {
                what: "type",
                value: self.name.clone(),
            });
        }
        match self.extends.as_deref() {
            Some(parent) if parent.trim().is_empty() => Err(CoreError::InvalidIdentifier {
                what: "supertype",
                value: parent.to_string(),
            }),
            Some(parent) if parent == self.name => Err(CoreError::SelfExtension(self.name.clone())),
            _ => Ok(()),
        }
    }
}

/// Classification of a finalized type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeKind {
    /// No registered ancestor; carries its full property set.
    RootObject {
        properties: Properties,
        #[serde(skip_serializing_if = "Option::is_none")]
        discriminator: Option<String>,
    },
    /// Own properties only, plus the id of the immediate ancestor.
    Extension {
        properties: Properties,
        supertype: String,
    },
}

/// Finalized, registry-resident description of one declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(skip)]
    pub constructor: ConstructorHandle,
}

impl TypeDescriptor {
    #[must_use]
    pub fn root(
        id: impl Into<String>,
        properties: Properties,
        discriminator: Option<String>,
        constructor: ConstructorHandle,
    ) -> Self {
        Self {
            id: id.into(),
            kind: TypeKind::RootObject {
                properties,
                discriminator,
            },
            constructor,
        }
    }

    #[must_use]
    pub fn extension(
        id: impl Into<String>,
        properties: Properties,
        supertype: impl Into<String>,
        constructor: ConstructorHandle,
    ) -> Self {
        Self {
            id: id.into(),
            kind: TypeKind::Extension {
                properties,
                supertype: supertype.into(),
            },
            constructor,
        }
    }

    /// This type's own declared properties (never the ancestor's).
    #[must_use]
    pub fn properties(&self) -> &Properties {
        match &self.kind {
            TypeKind::RootObject { properties, .. } | TypeKind::Extension { properties, .. } => {
                properties
            }
        }
    }

    #[must_use]
    pub fn discriminator(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::RootObject { discriminator, .. } => discriminator.as_deref(),
            TypeKind::Extension { .. } => None,
        }
    }

    #[must_use]
    pub fn supertype(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::RootObject { .. } => None,
            TypeKind::Extension { supertype, .. } => Some(supertype),
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self.kind, TypeKind::RootObject { .. })
    }

    /// Kind label as it appears in serialized output.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::RootObject { .. } => "root-object",
            TypeKind::Extension { .. } => "extension",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemars::json_schema;

    struct Animal;
    struct Dog;
    struct Wrapper<T>(T);

    fn props(names: &[&str]) -> Properties {
        names
            .iter()
            .map(|n| {
                (
                    (*n).to_string(),
                    PropertyDescriptor::new(*n, json_schema!({ "type": "string" })),
                )
            })
            .collect()
    }

    #[test]
    fn handle_short_name_strips_paths_but_keeps_generics() {
        assert_eq!(ConstructorHandle::of::<Animal>().short_name(), "Animal");
        assert_eq!(ConstructorHandle::of::<Wrapper<Dog>>().short_name(), "Wrapper<Dog>");
        assert_eq!(
            ConstructorHandle::of::<Wrapper<Vec<String>>>().short_name(),
            "Wrapper<Vec<String>>"
        );
    }

    #[test]
    fn generic_instantiations_get_distinct_ids() {
        let dogs = TypeTarget::of::<Wrapper<Dog>>();
        let animals = TypeTarget::of::<Wrapper<Animal>>();
        assert_eq!(dogs.name(), "Wrapper<Dog>");
        assert_eq!(animals.name(), "Wrapper<Animal>");
        assert_ne!(dogs.handle(), animals.handle());
    }

    #[test]
    fn handle_identifies_its_type() {
        let handle = ConstructorHandle::of::<Dog>();
        assert!(handle.is::<Dog>());
        assert!(!handle.is::<Animal>());
        assert!(handle.type_path().ends_with("Dog"));
    }

    #[test]
    fn target_defaults_to_short_name_without_parent() {
        let target = TypeTarget::of::<Dog>();
        assert_eq!(target.name(), "Dog");
        assert_eq!(target.extends(), None);

        let target = target.extending("Animal");
        assert_eq!(target.extends(), Some("Animal"));
        assert!(target.validate().is_ok());
    }

    #[test]
    fn target_rejects_blank_name_and_self_extension() {
        assert!(matches!(
            TypeTarget::named::<Dog>("  ").validate(),
            Err(CoreError::InvalidIdentifier { what: "type", .. })
        ));
        assert!(matches!(
            TypeTarget::named::<Dog>("Dog").extending("Dog").validate(),
            Err(CoreError::SelfExtension(name)) if name == "Dog"
        ));
    }

    #[test]
    fn root_descriptor_serializes_without_handle() {
        let descriptor = TypeDescriptor::root(
            "Animal",
            props(&["name"]),
            Some("type".into()),
            ConstructorHandle::of::<Animal>(),
        );
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "Animal",
                "kind": "root-object",
                "properties": {
                    "name": { "type": "string" }
                },
                "discriminator": "type"
            })
        );
    }

    #[test]
    fn extension_exposes_supertype_but_no_discriminator() {
        let descriptor = TypeDescriptor::extension(
            "Dog",
            props(&["breed"]),
            "Animal",
            ConstructorHandle::of::<Dog>(),
        );
        assert_eq!(descriptor.supertype(), Some("Animal"));
        assert_eq!(descriptor.discriminator(), None);
        assert!(!descriptor.is_root());
        assert_eq!(descriptor.kind_name(), "extension");
        assert_eq!(
            descriptor.properties().keys().collect::<Vec<_>>(),
            vec!["breed"]
        );
    }
}
