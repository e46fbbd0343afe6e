//! Metadata document export.
//!
//! Root objects render as a plain object schema; extensions render as an
//! `allOf` of their own properties and a `$ref` to their supertype, so the
//! document stays the same size as the registry.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value, json};
use tyreg_core::{Properties, TypeDescriptor, TypeKind};

pub(crate) fn document(types: &HashMap<String, TypeDescriptor>, ref_prefix: &str) -> Value {
    let schemas: BTreeMap<&str, Value> = types
        .iter()
        .map(|(id, descriptor)| (id.as_str(), type_schema(descriptor, ref_prefix)))
        .collect();

    json!({ "components": { "schemas": schemas } })
}

fn type_schema(descriptor: &TypeDescriptor, ref_prefix: &str) -> Value {
    match &descriptor.kind {
        TypeKind::RootObject {
            properties,
            discriminator,
        } => {
            let mut schema = json!({
                "$id": descriptor.id,
                "type": "object",
                "properties": property_map(properties),
            });
            if let (Some(discriminator), Some(object)) = (discriminator, schema.as_object_mut()) {
                object.insert(
                    "discriminator".to_string(),
                    json!({ "propertyName": discriminator }),
                );
            }
            schema
        }
        TypeKind::Extension {
            properties,
            supertype,
        } => json!({
            "$id": descriptor.id,
            "allOf": [
                { "type": "object", "properties": property_map(properties) },
                { "$ref": format!("{ref_prefix}{supertype}") },
            ],
        }),
    }
}

fn property_map(properties: &Properties) -> Map<String, Value> {
    properties
        .values()
        .map(|property| (property.name.clone(), property.schema.as_value().clone()))
        .collect()
}
