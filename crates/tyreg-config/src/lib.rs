//! # tyreg-config
//!
//! Layered configuration loading for tyreg using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TYREG_*` prefix, `__` as separator)
//! 2. Project-level `.tyreg/config.toml`
//! 3. User-level `~/.config/tyreg/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TYREG_REGISTRY__DUPLICATE_TYPES` -> `registry.duplicate_types`,
//! `TYREG_EXPORT__REF_PREFIX` -> `export.ref_prefix`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tyreg_config::TyregConfig;
//!
//! let config = TyregConfig::load_with_dotenv().expect("config");
//! println!("ref prefix: {:?}", config.export.ref_prefix);
//! ```

mod error;
mod export;

pub use error::ConfigError;
pub use export::ExportConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tyreg_core::RegistrationPolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TyregConfig {
    /// Duplicate and unresolved-type handling during registration.
    #[serde(default)]
    pub registry: RegistrationPolicy,
    #[serde(default)]
    pub export: ExportConfig,
}

impl TyregConfig {
    /// Load configuration for the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv_from`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on malformed sources and
    /// `ConfigError::InvalidValue` when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with `.tyreg/config.toml` looked up under `project_root`.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.export.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support for the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load_with_dotenv_from`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(Path::new("."))
    }

    /// Load `project_root/.env` (when present) into the process environment,
    /// then load configuration for `project_root`.
    ///
    /// Variables already set in the environment are not overridden.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` when the `.env` file exists but cannot be
    /// read or parsed, otherwise see [`Self::load`].
    pub fn load_with_dotenv_from(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.is_file() {
            dotenvy::from_path(&env_path).map_err(|source| ConfigError::Dotenv {
                path: env_path.clone(),
                source,
            })?;
        }
        Self::load_from(project_root)
    }

    /// Build the figment provider chain for the current directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    #[must_use]
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(".tyreg").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TYREG_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tyreg").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tyreg_core::{DuplicatePolicy, UnresolvedPolicy};

    #[test]
    fn default_config_is_permissive() {
        let config = TyregConfig::default();
        assert_eq!(config.registry.duplicate_types, DuplicatePolicy::Replace);
        assert_eq!(config.registry.unresolved_types, UnresolvedPolicy::Fallback);
        assert!(config.export.ref_prefix.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: TyregConfig = TyregConfig::figment().extract()?;
            assert_eq!(config.registry, RegistrationPolicy::default());
            assert!(config.export.pretty);
            Ok(())
        });
    }
}
