//! Metadata export configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Prefix prepended to `$ref` targets (e.g. `#/components/schemas/`).
    #[serde(default)]
    pub ref_prefix: String,

    /// Pretty-print exported JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ref_prefix: String::new(),
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    /// Reject prefixes that cannot form a reference.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `ref_prefix` contains whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ref_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "export.ref_prefix".into(),
                reason: "must not contain whitespace".into(),
            });
        }
        Ok(())
    }
}
