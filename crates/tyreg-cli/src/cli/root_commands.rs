use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the metadata document for every declared type
    Export(ExportArgs),
    /// Print one type with its inherited properties resolved
    Show(ShowArgs),
    /// List declared types
    List(ListArgs),
}

/// Arguments for `tyreg export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Declaration manifest (TOML)
    pub manifest: PathBuf,
    /// Override the configured `$ref` prefix
    #[arg(long)]
    pub ref_prefix: Option<String>,
}

/// Arguments for `tyreg show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Declaration manifest (TOML)
    pub manifest: PathBuf,
    /// Type id to resolve
    pub type_name: String,
}

/// Arguments for `tyreg list`.
#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Declaration manifest (TOML)
    pub manifest: PathBuf,
}
