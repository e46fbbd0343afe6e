pub mod export;
pub mod list;
pub mod show;

use crate::bootstrap::AppContext;
use crate::cli::Commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Export(args) => export::handle(args, ctx),
        Commands::Show(args) => show::handle(args, ctx),
        Commands::List(args) => list::handle(args, ctx),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Write;

    use tyreg_config::TyregConfig;

    use crate::bootstrap::AppContext;
    use crate::cli::OutputFormat;

    const ZOO: &str = r#"
[[types]]
name = "Dog"
extends = "Animal"

[[types.fields]]
key = "breed"
type = "string"

[[types]]
name = "Animal"
discriminator = "type"

[[types.fields]]
key = "name"
type = "string"

[[types.fields]]
key = "type"
type = "string"
"#;

    /// Manifest declaring `Dog` before its supertype `Animal`.
    pub fn zoo_manifest() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp manifest");
        file.write_all(ZOO.as_bytes()).expect("write manifest");
        file
    }

    pub fn context() -> AppContext {
        AppContext {
            config: TyregConfig::default(),
            format: OutputFormat::Json,
        }
    }
}
