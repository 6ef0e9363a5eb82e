//! Resource-level language filter applied to datatype property reads.

use serde::{Deserialize, Serialize};

use super::Value;

/// Whether untagged values survive an active language filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    /// Untagged values pass through alongside the matching tag.
    #[default]
    Loose,
    /// Only values carrying exactly the requested tag pass.
    Strict,
}

/// Language tag filter plus its strictness.
///
/// Inactive while `tag` is `None`. Changing it never touches stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageFilter {
    pub tag: Option<String>,
    #[serde(default)]
    pub mode: LanguageMode,
}

impl LanguageFilter {
    pub fn new(tag: impl Into<String>, mode: LanguageMode) -> Self {
        Self { tag: Some(tag.into()), mode }
    }

    pub fn is_active(&self) -> bool {
        self.tag.is_some()
    }

    pub fn is_strict(&self) -> bool {
        self.mode == LanguageMode::Strict
    }

    /// Does `value` pass this filter?
    pub fn accepts(&self, value: &Value) -> bool {
        let Some(tag) = &self.tag else { return true };
        match value.language() {
            Some(lang) => lang == tag,
            None => self.mode == LanguageMode::Loose,
        }
    }
}
