//! A single literal or reference held by a property.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::export::{escape_iri, escape_literal};

/// One value of a property.
///
/// The model does not distinguish literals from references here: the
/// owning property's [`PropertyKind`](super::PropertyKind) says how to read
/// `content`. Content, language and datatype are fixed at construction;
/// only the attached reification statements can change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    content: String,
    language: Option<String>,
    datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reifications: Option<Vec<Resource>>,
    /// Set only on the "no value" placeholder returned by failed lookups.
    #[serde(skip)]
    sentinel: bool,
}

/// Shared placeholder handed out by reference from failed lookups.
pub(crate) static SENTINEL: Value = Value::EMPTY;

impl Value {
    /// The "no value" placeholder. Empty content, no language, no datatype.
    pub const EMPTY: Value = Value {
        content: String::new(),
        language: None,
        datatype: None,
        reifications: None,
        sentinel: true,
    };

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: None,
            datatype: None,
            reifications: None,
            sentinel: false,
        }
    }

    /// Literal with optional language tag and datatype URI.
    pub fn literal(
        content: impl Into<String>,
        language: Option<String>,
        datatype: Option<String>,
    ) -> Self {
        Self {
            language,
            datatype,
            ..Self::new(content)
        }
    }

    /// A fresh copy of the "no value" placeholder.
    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Datatype URI, if any.
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// True only for the placeholder produced by a failed lookup.
    ///
    /// `Value::new("")` is a legitimate empty literal and is not a
    /// sentinel, even though its content compares equal.
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }

    /// Attach a set of reification statements, replacing any earlier set.
    pub fn add_reifications(mut self, reifications: Vec<Resource>) -> Self {
        self.set_reifications(reifications);
        self
    }

    /// In-place form of [`add_reifications`](Self::add_reifications).
    pub fn set_reifications(&mut self, reifications: Vec<Resource>) -> &mut Self {
        self.reifications = Some(reifications);
        self
    }

    /// The attached reification statements, `None` if never set.
    pub fn reifications(&self) -> Option<&[Resource]> {
        self.reifications.as_deref()
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<&str> for Value { fn from(v: &str) -> Self { Value::new(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::new(v) } }

// ============================================================================
// Display
// ============================================================================

/// Renders as an N-Triples literal, escaped the same way the exporter does.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.content))?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")?;
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{}>", escape_iri(dt))?;
        }
        Ok(())
    }
}
