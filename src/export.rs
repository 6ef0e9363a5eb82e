//! N-Triples export. Serializes a resource and its reifications.
//!
//! ```text
//! Resource → write_ntriples() → <s> <p> "o"@en .
//!   → feed into any RDF loader, or diff against a service response
//! ```
//!
//! Reification statements have no IRI of their own (their identity is an
//! MD5 digest), so they are written as blank nodes labelled `_:r<digest>`.

use std::borrow::Cow;
use std::io::Write;

use hashbrown::HashSet;

use crate::model::vocab::{RDF_OBJECT, RDF_PREDICATE, RDF_STATEMENT, RDF_SUBJECT, RDF_TYPE};
use crate::model::*;
use crate::Result;

/// Write `resource` as N-Triples.
///
/// Output follows insertion order: explicit types first, then every stored
/// value of every property. The resource's language filter is ignored; an
/// export always carries the full data.
pub fn write_ntriples(resource: &Resource, writer: &mut dyn Write) -> Result<()> {
    let subject = iri(resource.uri());
    let mut written_statements = HashSet::new();

    // `types()` reports owl:Thing for untyped resources; only explicit types are data.
    if resource.has_explicit_types() {
        for ty in resource.types() {
            triple(writer, &subject, RDF_TYPE, &iri(ty))?;
        }
    }

    for property in resource.properties() {
        let Some(stored) = property.property() else { continue };
        for value in stored.values() {
            let object = term(stored, value);
            triple(writer, &subject, stored.uri(), &object)?;

            for statement in value.reifications().unwrap_or_default() {
                let node = format!("_:r{}", statement.uri());
                if written_statements.insert(node.clone()) {
                    triple(writer, &node, RDF_TYPE, &iri(RDF_STATEMENT))?;
                    triple(writer, &node, RDF_SUBJECT, &subject)?;
                    triple(writer, &node, RDF_PREDICATE, &iri(stored.uri()))?;
                    triple(writer, &node, RDF_OBJECT, &object)?;
                }
                for meta in statement.properties() {
                    let Some(meta) = meta.property() else { continue };
                    for v in meta.values() {
                        triple(writer, &node, meta.uri(), &term(meta, v))?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Render `resource` as an N-Triples document.
pub fn to_ntriples(resource: &Resource) -> Result<String> {
    let mut buf = Vec::new();
    write_ntriples(resource, &mut buf)?;
    // Every term is built from `&str`, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn triple(writer: &mut dyn Write, subject: &str, predicate: &str, object: &str) -> Result<()> {
    writeln!(writer, "{subject} <{}> {object} .", escape_iri(predicate))?;
    Ok(())
}

/// Object term for one value: an IRI for object properties, else a literal.
fn term(property: &Property, value: &Value) -> String {
    match property.kind() {
        PropertyKind::Object => iri(value.content()),
        PropertyKind::Datatype => value.to_string(),
    }
}

fn iri(uri: &str) -> String {
    format!("<{}>", escape_iri(uri))
}

fn forbidden_in_iri(c: char) -> bool {
    c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

/// Escape a URI for use inside `<...>`.
///
/// URIs are stored unvalidated, so characters IRIREF forbids are written as
/// `\u00XX` escapes instead of breaking the term.
pub(crate) fn escape_iri(uri: &str) -> Cow<'_, str> {
    if !uri.chars().any(forbidden_in_iri) {
        return Cow::Borrowed(uri);
    }
    let mut out = String::with_capacity(uri.len() + 12);
    for c in uri.chars() {
        if forbidden_in_iri(c) {
            out.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Escape literal content for use inside `"..."`.
pub(crate) fn escape_literal(content: &str) -> Cow<'_, str> {
    if !content.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(content);
    }
    let mut out = String::with_capacity(content.len() + 4);
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
