//! Declaration manifests.
//!
//! A manifest lists types in declaration order. Each field's `type` is what
//! the introspector reports; `name` and `schema_type` are the annotation's
//! explicit overrides and only apply together.
//!
//! ```toml
//! [[types]]
//! name = "Animal"
//! discriminator = "type"
//!
//! [[types.fields]]
//! key = "name"
//! type = "string"
//!
//! [[types]]
//! name = "Dog"
//! extends = "Animal"
//!
//! [[types.fields]]
//! key = "breed"
//! type = "string"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tyreg_core::{DeclaredTypes, RegistrationPolicy, TypeNameLike, TypeTarget};
use tyreg_schema::{FrozenRegistry, JsonSchemaGenerator, Loader, TypeOptions};

/// Rust handle shared by every manifest-declared type.
struct ManifestType;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub key: String,
    #[serde(rename = "type", default)]
    pub declared_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub schema_type: Option<String>,
}

impl TypeEntry {
    fn target(&self) -> TypeTarget {
        let target = TypeTarget::named::<ManifestType>(&self.name);
        match &self.extends {
            Some(parent) => target.extending(parent),
            None => target,
        }
    }
}

impl Manifest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Declared field types, as the introspector will report them.
    #[must_use]
    pub fn declared_types(&self) -> DeclaredTypes {
        let mut table = DeclaredTypes::new();
        for entry in &self.types {
            for field in &entry.fields {
                if let Some(declared) = &field.declared_type {
                    table.insert(&entry.name, &field.key, type_name_like(declared));
                }
            }
        }
        table
    }

    /// Annotate every field, then its type, in file order.
    pub fn build(
        &self,
        policy: RegistrationPolicy,
        ref_prefix: &str,
    ) -> anyhow::Result<FrozenRegistry> {
        let mut loader = Loader::new()
            .with_generator(JsonSchemaGenerator::new().with_ref_prefix(ref_prefix))
            .with_introspector(self.declared_types())
            .with_policy(policy);

        for entry in &self.types {
            let target = entry.target();
            for field in &entry.fields {
                loader
                    .annotate_field(
                        &target,
                        &field.key,
                        field.name.as_deref(),
                        field.schema_type.as_deref(),
                    )
                    .with_context(|| format!("field {}.{}", entry.name, field.key))?;
            }
            let options = TypeOptions {
                discriminator: entry.discriminator.clone(),
            };
            loader
                .annotate_type(&target, options)
                .with_context(|| format!("type {}", entry.name))?;
        }

        tracing::debug!(types = self.types.len(), "manifest applied");
        Ok(loader.finish())
    }
}

fn type_name_like(declared: &str) -> TypeNameLike {
    let is_primitive = ["string", "number", "boolean", "any"]
        .iter()
        .any(|p| declared.eq_ignore_ascii_case(p));
    if is_primitive {
        TypeNameLike::literal(declared)
    } else {
        TypeNameLike::named(declared)
    }
}
