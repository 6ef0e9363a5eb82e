//! Namespace prefixes and URI expansion.
//!
//! The model stores every URI in expanded form and asks a [`UriExpander`]
//! to do the expanding. [`Namespaces`] is the stock prefix table; any
//! `Fn(&str) -> String` works too.

use std::sync::{Arc, LazyLock};

use hashbrown::HashMap;

use crate::{Error, Result};

/// Turns a possibly prefixed URI (`foaf:name`) into its full form.
///
/// Must not fail: input it cannot expand comes back unchanged.
pub trait UriExpander: Send + Sync {
    fn unprefixed_uri(&self, uri: &str) -> String;
}

impl<F> UriExpander for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn unprefixed_uri(&self, uri: &str) -> String {
        self(uri)
    }
}

/// Expander that returns every URI as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl UriExpander for Verbatim {
    fn unprefixed_uri(&self, uri: &str) -> String {
        uri.to_owned()
    }
}

static STANDARD: LazyLock<Arc<Namespaces>> = LazyLock::new(|| Arc::new(Namespaces::new()));

/// Prefix → namespace IRI table.
#[derive(Debug, Clone)]
pub struct Namespaces {
    prefixes: HashMap<String, String>,
}

impl Namespaces {
    /// Table preloaded with the common RDF vocabularies.
    pub fn new() -> Self {
        let mut ns = Self::empty();
        ns.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        ns.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        ns.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        ns.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        ns.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        ns.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        ns.add_prefix("dcterms", "http://purl.org/dc/terms/");
        ns.add_prefix("skos", "http://www.w3.org/2004/02/skos/core#");
        ns.add_prefix("wsf", "http://purl.org/ontology/wsf#");
        ns.add_prefix("iron", "http://purl.org/ontology/iron#");
        ns
    }

    pub fn empty() -> Self {
        Self { prefixes: HashMap::new() }
    }

    /// Process-wide standard table, shared by resources built without an expander.
    pub fn shared() -> Arc<Namespaces> {
        Arc::clone(&STANDARD)
    }

    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    pub fn iri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Strict expansion of `prefix:local`.
    pub fn expand(&self, compact: &str) -> Result<String> {
        let (prefix, local) = compact
            .split_once(':')
            .ok_or_else(|| Error::UnknownPrefix(compact.to_owned()))?;
        let iri = self
            .iri(prefix)
            .ok_or_else(|| Error::UnknownPrefix(prefix.to_owned()))?;
        Ok(format!("{iri}{local}"))
    }

    /// Shorten `iri` with the longest matching namespace.
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by(|(pa, a), (pb, b)| a.len().cmp(&b.len()).then_with(|| pb.cmp(pa)))
            .map(|(prefix, ns)| format!("{prefix}:{}", &iri[ns.len()..]))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new()
    }
}

impl UriExpander for Namespaces {
    fn unprefixed_uri(&self, uri: &str) -> String {
        if uri.contains("://") {
            return uri.to_owned();
        }
        self.expand(uri).unwrap_or_else(|_| uri.to_owned())
    }
}
