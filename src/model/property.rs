//! Named, multi-valued attribute of a resource.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::SENTINEL;
use super::{LanguageFilter, Value};
use crate::namespace::UriExpander;

/// How a property's values are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Values are literals. Subject to the resource language filter.
    #[default]
    Datatype,
    /// Values are URIs of other resources. Never language-filtered.
    Object,
}

/// A property and its ordered values.
///
/// A standalone property has no language context: its accessors see every
/// stored value. Once added to a [`Resource`](super::Resource) it is read
/// through [`PropertyRef`], which applies the resource's language filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    uri: String,
    #[serde(default)]
    kind: PropertyKind,
    values: SmallVec<[Value; 1]>,
    #[serde(skip)]
    bound: bool,
}

impl Property {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            kind: PropertyKind::Datatype,
            values: SmallVec::new(),
            bound: false,
        }
    }

    /// Shorthand for `Property::new(uri)` followed by `mark_object_property()`.
    pub fn object(uri: impl Into<String>) -> Self {
        let mut p = Self::new(uri);
        p.mark_object_property();
        p
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.add_value(value.into());
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_object(&self) -> bool {
        self.kind == PropertyKind::Object
    }

    pub fn is_datatype(&self) -> bool {
        self.kind == PropertyKind::Datatype
    }

    /// Switch to object semantics. There is no way back to datatype.
    pub fn mark_object_property(&mut self) -> &mut Self {
        self.kind = PropertyKind::Object;
        self
    }

    /// Append a value. Insertion order is iteration order.
    pub fn add_value(&mut self, value: Value) -> &mut Self {
        self.values.push(value);
        self
    }

    /// Every stored value, unfiltered.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// 1-based access into the stored values; 0 reads as 1.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index.max(1) - 1)
    }

    /// Like [`get`](Self::get) but a miss yields the sentinel value.
    pub fn value(&self, index: usize) -> &Value {
        self.get(index).unwrap_or(&SENTINEL)
    }

    pub fn exists(&self) -> bool {
        !self.values.is_empty()
    }

    /// Has this property been attached to a resource?
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Attach to a resource's namespace context: expand the URI and mark bound.
    /// Only `Resource::add_property` calls this.
    pub(crate) fn define_resource(&mut self, expander: &dyn UriExpander) {
        self.uri = expander.unprefixed_uri(&self.uri);
        self.bind();
    }

    /// Mark bound without touching the URI (already expanded when stored).
    pub(crate) fn bind(&mut self) {
        self.bound = true;
    }
}

// ============================================================================
// PropertyRef: a property read through its owning resource
// ============================================================================

/// Borrowed view of a resource's property, language-aware.
///
/// Produced by `Resource::property`. A lookup miss produces a view with no
/// backing property: it reports no values and never fails.
#[derive(Debug, Clone)]
pub struct PropertyRef<'a> {
    uri: Cow<'a, str>,
    property: Option<&'a Property>,
    language: &'a LanguageFilter,
}

impl<'a> PropertyRef<'a> {
    pub(crate) fn bound(property: &'a Property, language: &'a LanguageFilter) -> Self {
        Self { uri: Cow::Borrowed(property.uri()), property: Some(property), language }
    }

    pub(crate) fn missing(uri: String, language: &'a LanguageFilter) -> Self {
        Self { uri: Cow::Owned(uri), property: None, language }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The backing property, `None` for a lookup miss.
    pub fn property(&self) -> Option<&'a Property> {
        self.property
    }

    pub fn is_empty(&self) -> bool {
        self.property.is_none()
    }

    pub fn kind(&self) -> PropertyKind {
        self.property.map(Property::kind).unwrap_or_default()
    }

    pub fn is_object(&self) -> bool {
        self.kind() == PropertyKind::Object
    }

    fn filter(&self) -> Option<&'a LanguageFilter> {
        (self.kind() == PropertyKind::Datatype && self.language.is_active()).then_some(self.language)
    }

    fn iter(&self) -> impl Iterator<Item = &'a Value> + use<'a> {
        let filter = self.filter();
        self.property
            .map(Property::values)
            .unwrap_or_default()
            .iter()
            .filter(move |v| filter.is_none_or(|f| f.accepts(v)))
    }

    /// Values visible under the resource's language settings, in order.
    pub fn values(&self) -> Vec<&'a Value> {
        self.iter().collect()
    }

    /// 1-based access into the visible values; 0 reads as 1.
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.iter().nth(index.max(1) - 1)
    }

    /// Like [`get`](Self::get) but a miss yields the sentinel value.
    pub fn value(&self, index: usize) -> &'a Value {
        self.get(index).unwrap_or(&SENTINEL)
    }

    pub fn exists(&self) -> bool {
        self.iter().next().is_some()
    }
}
