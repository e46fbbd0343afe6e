use std::path::Path;

use anyhow::Context;
use tyreg_config::TyregConfig;
use tyreg_schema::FrozenRegistry;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::manifest::Manifest;

/// Everything a command handler needs.
pub struct AppContext {
    pub config: TyregConfig,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let root = flags.project.as_deref().unwrap_or_else(|| Path::new("."));
        let config = TyregConfig::load_with_dotenv_from(root)
            .with_context(|| format!("failed to load config for {}", root.display()))?;

        let format = flags.format.unwrap_or(if config.export.pretty {
            OutputFormat::Json
        } else {
            OutputFormat::Raw
        });

        Ok(Self { config, format })
    }

    /// Apply a manifest under the configured policy.
    pub fn registry(&self, manifest: &Path, ref_prefix: &str) -> anyhow::Result<FrozenRegistry> {
        Manifest::load(manifest)?.build(self.config.registry, ref_prefix)
    }

    /// `requested` if given, else the configured `$ref` prefix.
    pub fn ref_prefix<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(self.config.export.ref_prefix.as_str())
    }
}
