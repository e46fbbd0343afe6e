use serde_json::Value;

use crate::bootstrap::AppContext;
use crate::cli::root_commands::ExportArgs;
use crate::output::output;

/// Handle `tyreg export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext) -> anyhow::Result<()> {
    output(&document(args, ctx)?, ctx.format)
}

fn document(args: &ExportArgs, ctx: &AppContext) -> anyhow::Result<Value> {
    let ref_prefix = ctx.ref_prefix(args.ref_prefix.as_deref());
    let registry = ctx.registry(&args.manifest, ref_prefix)?;
    Ok(registry.document(ref_prefix))
}
