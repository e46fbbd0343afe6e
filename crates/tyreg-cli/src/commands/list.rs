use serde::Serialize;
use tyreg_core::TypeDescriptor;
use tyreg_schema::FrozenRegistry;

use crate::bootstrap::AppContext;
use crate::cli::root_commands::ListArgs;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct TypeSummary<'a> {
    id: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    supertype: Option<&'a str>,
    properties: usize,
}

impl<'a> From<&'a TypeDescriptor> for TypeSummary<'a> {
    fn from(descriptor: &'a TypeDescriptor) -> Self {
        Self {
            id: &descriptor.id,
            kind: descriptor.kind_name(),
            supertype: descriptor.supertype(),
            properties: descriptor.properties().len(),
        }
    }
}

/// Handle `tyreg list`.
pub fn handle(args: &ListArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let registry = ctx.registry(&args.manifest, ctx.ref_prefix(None))?;
    output(&summaries(&registry), ctx.format)
}

/// One summary per registered type, sorted by id.
fn summaries(registry: &FrozenRegistry) -> Vec<TypeSummary<'_>> {
    registry
        .ids()
        .into_iter()
        .filter_map(|id| registry.get(id))
        .map(TypeSummary::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use pretty_assertions::assert_eq;
    use tyreg_core::{ConstructorHandle, Properties};

    #[test]
    fn summary_reports_kind_and_supertype() {
        let descriptor = TypeDescriptor::extension(
            "Dog",
            Properties::new(),
            "Animal",
            ConstructorHandle::of::<()>(),
        );
        assert_eq!(
            TypeSummary::from(&descriptor),
            TypeSummary {
                id: "Dog",
                kind: "extension",
                supertype: Some("Animal"),
                properties: 0,
            }
        );
    }

    #[test]
    fn lists_manifest_types_in_id_order() {
        let manifest = fixtures::zoo_manifest();
        let ctx = fixtures::context();
        let registry = ctx.registry(manifest.path(), "").unwrap();

        assert_eq!(
            summaries(&registry),
            vec![
                TypeSummary {
                    id: "Animal",
                    kind: "root-object",
                    supertype: None,
                    properties: 2,
                },
                TypeSummary {
                    id: "Dog",
                    kind: "extension",
                    supertype: Some("Animal"),
                    properties: 1,
                },
            ]
        );
    }
}
