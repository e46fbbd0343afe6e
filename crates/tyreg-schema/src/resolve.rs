//! Supertype resolution for registry consumers.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tyreg_core::{Properties, TypeDescriptor};

use crate::error::SchemaError;

/// A type with its inherited properties merged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedType {
    pub id: String,
    /// Type ids from the root of the chain down to `id`.
    pub chain: Vec<String>,
    /// Properties of every type in the chain; a descendant's property
    /// replaces an ancestor's property of the same name.
    pub properties: Properties,
    /// Discriminator declared on the root of the chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
}

pub(crate) fn resolve(
    types: &HashMap<String, TypeDescriptor>,
    id: &str,
) -> Result<ResolvedType, SchemaError> {
    let mut current = types
        .get(id)
        .ok_or_else(|| SchemaError::NotFound(id.to_string()))?;
    let mut seen = HashSet::from([current.id.as_str()]);
    let mut lineage = vec![current];

    while let Some(supertype) = current.supertype() {
        if !seen.insert(supertype) {
            let mut chain: Vec<String> = lineage.iter().map(|d| d.id.clone()).collect();
            chain.push(supertype.to_string());
            return Err(SchemaError::InheritanceCycle { chain });
        }
        current = types
            .get(supertype)
            .ok_or_else(|| SchemaError::UnknownSupertype {
                id: current.id.clone(),
                supertype: supertype.to_string(),
            })?;
        lineage.push(current);
    }

    lineage.reverse();
    let mut properties = Properties::new();
    for descriptor in &lineage {
        properties.extend(
            descriptor
                .properties()
                .iter()
                .map(|(name, property)| (name.clone(), property.clone())),
        );
    }

    Ok(ResolvedType {
        id: id.to_string(),
        chain: lineage.iter().map(|d| d.id.clone()).collect(),
        properties,
        discriminator: lineage
            .first()
            .and_then(|root| root.discriminator())
            .map(str::to_string),
    })
}
