//! Registration policies.
//!
//! The defaults reproduce silent last-writer-wins and best-effort type
//! fallback. The `Reject` variants turn those cases into hard errors.

use serde::{Deserialize, Serialize};

/// What to do when an id (type or property) is registered a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last writer wins.
    #[default]
    Replace,
    Reject,
}

/// What to do when a field's type cannot be determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Use the generic `any` type name.
    #[default]
    Fallback,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPolicy {
    #[serde(default)]
    pub duplicate_types: DuplicatePolicy,
    #[serde(default)]
    pub duplicate_fields: DuplicatePolicy,
    #[serde(default)]
    pub unresolved_types: UnresolvedPolicy,
}

impl RegistrationPolicy {
    /// Every ambiguous case becomes an error.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            duplicate_types: DuplicatePolicy::Reject,
            duplicate_fields: DuplicatePolicy::Reject,
            unresolved_types: UnresolvedPolicy::Reject,
        }
    }
}
