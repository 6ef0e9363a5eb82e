//! Import configuration.

use serde::{Deserialize, Serialize};

use crate::model::vocab::RESERVED_KEYS;
use crate::model::{LanguageFilter, LanguageMode};

/// Options for building resources from decoded records.
///
/// Deserializable so it can sit inside a larger client configuration:
///
/// ```
/// let config: wsf_rs::ImportConfig =
///     serde_json::from_str(r#"{ "language": "en", "strict_language": true }"#).unwrap();
/// assert!(config.is_reserved("prefLabel"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Record keys the importer skips.
    pub reserved_keys: Vec<String>,
    /// Language filter installed on each imported resource.
    pub language: Option<String>,
    pub strict_language: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            reserved_keys: RESERVED_KEYS.iter().map(|k| k.to_string()).collect(),
            language: None,
            strict_language: false,
        }
    }
}

impl ImportConfig {
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.iter().any(|k| k == key)
    }

    pub fn language_filter(&self) -> LanguageFilter {
        LanguageFilter {
            tag: self.language.clone(),
            mode: if self.strict_language { LanguageMode::Strict } else { LanguageMode::Loose },
        }
    }
}
