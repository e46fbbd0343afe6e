//! Schema fragment generation from type names.
//!
//! Type names follow a small grammar:
//!
//! | type name            | fragment |
//! |----------------------|----------|
//! | `string`, `number`, `boolean` | `{"type": "<name>"}` |
//! | `any`                | `{}` |
//! | `Array<T>`, `T[]`    | `{"type": "array", "items": <T>}` |
//! | `Map<string, T>`     | `{"type": "object", "additionalProperties": <T>}` |
//! | anything else        | `{"$ref": "<prefix><name>"}` |

use schemars::json_schema;
use tyreg_core::SchemaFragment;

/// Type name used when a field's declared type is unknown.
pub const ANY_TYPE: &str = "any";

/// Turns a type name into a structural schema fragment.
pub trait SchemaGenerator {
    /// Build the fragment for `type_name`. With `is_array` set, the result
    /// describes an array of that type.
    fn generate(&self, type_name: &str, is_array: bool) -> SchemaFragment;
}

impl<G: SchemaGenerator + ?Sized> SchemaGenerator for &G {
    fn generate(&self, type_name: &str, is_array: bool) -> SchemaFragment {
        (**self).generate(type_name, is_array)
    }
}

impl<G: SchemaGenerator + ?Sized> SchemaGenerator for Box<G> {
    fn generate(&self, type_name: &str, is_array: bool) -> SchemaFragment {
        (**self).generate(type_name, is_array)
    }
}

/// Default generator producing JSON-Schema fragments.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaGenerator {
    ref_prefix: String,
}

impl JsonSchemaGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to `$ref` targets, e.g. `#/components/schemas/`.
    #[must_use]
    pub fn with_ref_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ref_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn ref_prefix(&self) -> &str {
        &self.ref_prefix
    }

    fn fragment(&self, type_name: &str) -> SchemaFragment {
        let type_name = type_name.trim();

        if let Some(primitive) = primitive(type_name) {
            return json_schema!({ "type": primitive });
        }
        if type_name.eq_ignore_ascii_case(ANY_TYPE) {
            return json_schema!({});
        }
        if let Some(item) = array_item(type_name) {
            let items = self.fragment(item);
            return json_schema!({ "type": "array", "items": items });
        }
        if let Some(value) = map_value(type_name) {
            let values = self.fragment(value);
            return json_schema!({ "type": "object", "additionalProperties": values });
        }

        let reference = format!("{}{type_name}", self.ref_prefix);
        json_schema!({ "$ref": reference })
    }
}

impl SchemaGenerator for JsonSchemaGenerator {
    fn generate(&self, type_name: &str, is_array: bool) -> SchemaFragment {
        let fragment = self.fragment(type_name);
        if is_array {
            json_schema!({ "type": "array", "items": fragment })
        } else {
            fragment
        }
    }
}

fn primitive(type_name: &str) -> Option<&'static str> {
    ["string", "number", "boolean"]
        .into_iter()
        .find(|p| type_name.eq_ignore_ascii_case(p))
}

fn array_item(type_name: &str) -> Option<&str> {
    if let Some(inner) = generic_argument(type_name, "Array") {
        return Some(inner);
    }
    type_name
        .strip_suffix("[]")
        .map(str::trim)
        .filter(|inner| !inner.is_empty())
}

fn map_value(type_name: &str) -> Option<&str> {
    let inner = generic_argument(type_name, "Map")?;
    let (key, value) = inner.split_once(',')?;
    let value = value.trim();
    (key.trim().eq_ignore_ascii_case("string") && !value.is_empty()).then_some(value)
}

/// `Name<inner>` -> `inner`, trimmed.
fn generic_argument<'a>(type_name: &'a str, generic: &str) -> Option<&'a str> {
    type_name
        .strip_prefix(generic)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
        .map(str::trim)
        .filter(|inner| !inner.is_empty())
}
