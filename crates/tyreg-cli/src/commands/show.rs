use anyhow::Context;
use tyreg_schema::ResolvedType;

use crate::bootstrap::AppContext;
use crate::cli::root_commands::ShowArgs;
use crate::output::output;

/// Handle `tyreg show`.
pub fn handle(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    output(&resolve(args, ctx)?, ctx.format)
}

fn resolve(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<ResolvedType> {
    let registry = ctx.registry(&args.manifest, ctx.ref_prefix(None))?;
    registry
        .resolve(&args.type_name)
        .with_context(|| format!("cannot resolve type {}", args.type_name))
}
