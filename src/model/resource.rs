//! The subject entity: identity, types, properties, language settings.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};

use super::vocab::OWL_THING;
use super::{LanguageFilter, LanguageMode, Property, PropertyRef};
use crate::namespace::{Namespaces, UriExpander};

/// Namespace context a resource normalizes its URIs against.
///
/// Not part of the resource's identity: ignored by equality and skipped
/// by serde, which restores the standard prefix table.
#[derive(Clone)]
pub struct Expander(Arc<dyn UriExpander>);

impl Expander {
    pub fn new(expander: Arc<dyn UriExpander>) -> Self {
        Self(expander)
    }

    pub fn expand(&self, uri: &str) -> String {
        self.0.unprefixed_uri(uri)
    }

    pub(crate) fn as_dyn(&self) -> &dyn UriExpander {
        self.0.as_ref()
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self(Namespaces::shared())
    }
}

impl fmt::Debug for Expander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expander")
    }
}

impl PartialEq for Expander {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

/// One RDF subject and its attribute graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    uri: String,
    types: IndexSet<String>,
    #[serde(deserialize_with = "bind_properties")]
    properties: IndexMap<String, Property>,
    #[serde(default)]
    language: LanguageFilter,
    #[serde(skip)]
    expander: Expander,
}

/// Stored properties were bound when added; the flag is not serialized.
fn bind_properties<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IndexMap<String, Property>, D::Error> {
    let mut properties = IndexMap::<String, Property>::deserialize(deserializer)?;
    for property in properties.values_mut() {
        property.bind();
    }
    Ok(properties)
}

impl Resource {
    /// New resource; `uri` may be prefixed (`foaf:me`) and is stored expanded.
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self::with_expander(uri, Expander::default())
    }

    /// New resource normalizing against a caller-supplied namespace service.
    pub fn with_expander(uri: impl AsRef<str>, expander: Expander) -> Self {
        Self {
            uri: expander.expand(uri.as_ref()),
            expander,
            ..Self::default()
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Re-point this resource at a new subject. Used by the importer only.
    pub(crate) fn set_uri(&mut self, uri: &str) {
        self.uri = self.expander.expand(uri);
    }

    pub fn expander(&self) -> &Expander {
        &self.expander
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Register a type. Adding an existing type is a no-op.
    pub fn add_type(&mut self, uri: &str) -> &mut Self {
        self.types.insert(self.expander.expand(uri));
        self
    }

    /// Types in insertion order; `[owl:Thing]` when none were added.
    pub fn types(&self) -> Vec<&str> {
        if self.types.is_empty() {
            return vec![OWL_THING];
        }
        self.types.iter().map(String::as_str).collect()
    }

    /// 1-based type accessor; 0 reads as 1. Falls back to `owl:Thing`.
    pub fn type_at(&self, index: usize) -> &str {
        self.types
            .get_index(index.max(1) - 1)
            .map(String::as_str)
            .unwrap_or(OWL_THING)
    }

    /// False when `types()` is only reporting the `owl:Thing` fallback.
    pub fn has_explicit_types(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn has_type(&self, uri: &str) -> bool {
        self.types.contains(&self.expander.expand(uri))
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Attach `property`, replacing any earlier property with the same URI.
    pub fn add_property(&mut self, mut property: Property) -> &mut Self {
        property.define_resource(self.expander.as_dyn());
        let key = property.uri().to_owned();
        if let Some(previous) = self.properties.insert(key, property) {
            tracing::debug!(
                subject = %self.uri,
                property = previous.uri(),
                dropped_values = previous.values().len(),
                "property replaced"
            );
        }
        self
    }

    /// Look up a property. A miss yields an empty view, never an error.
    pub fn property(&self, uri: &str) -> PropertyRef<'_> {
        let key = self.expander.expand(uri);
        match self.properties.get(&key) {
            Some(p) => PropertyRef::bound(p, &self.language),
            None => PropertyRef::missing(key, &self.language),
        }
    }

    /// Like [`property`](Self::property), `None` on a miss.
    pub fn get_property(&self, uri: &str) -> Option<PropertyRef<'_>> {
        self.properties
            .get(&self.expander.expand(uri))
            .map(|p| PropertyRef::bound(p, &self.language))
    }

    /// All properties in insertion order, language-aware.
    pub fn properties(&self) -> impl Iterator<Item = PropertyRef<'_>> {
        self.properties.values().map(|p| PropertyRef::bound(p, &self.language))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    // ========================================================================
    // Language settings
    // ========================================================================

    /// Set or clear the language filter. Stored values are untouched.
    pub fn set_language(&mut self, tag: Option<&str>) -> &mut Self {
        self.language.tag = tag.map(str::to_owned);
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.tag.as_deref()
    }

    pub fn strict_language(&mut self) -> &mut Self {
        self.language.mode = LanguageMode::Strict;
        self
    }

    pub fn loose_language(&mut self) -> &mut Self {
        self.language.mode = LanguageMode::Loose;
        self
    }

    pub fn is_language_strict(&self) -> bool {
        self.language.is_strict()
    }

    pub fn language_filter(&self) -> &LanguageFilter {
        &self.language
    }
}
