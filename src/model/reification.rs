//! Reification statements: resources that describe one (subject, property, value) triple.
//!
//! A statement's identity is content-derived, so the same triple always
//! yields the same URI and the statement can be rebuilt independently of
//! the value that carries it.

use super::vocab::RDF_STATEMENT;
use super::{Expander, Property, Resource, Value};

/// Identity of the statement about `resource_uri property_uri value_content`:
/// lowercase hex MD5 of the three strings concatenated.
pub fn reification_uri(resource_uri: &str, property_uri: &str, value_content: &str) -> String {
    let mut input = String::with_capacity(resource_uri.len() + property_uri.len() + value_content.len());
    input.push_str(resource_uri);
    input.push_str(property_uri);
    input.push_str(value_content);
    format!("{:x}", md5::compute(input.as_bytes()))
}

impl Resource {
    /// Statement resource for a triple given by its parts. Typed `rdf:Statement`, no properties yet.
    pub fn reification(
        resource_uri: &str,
        property_uri: &str,
        value_content: &str,
        expander: Expander,
    ) -> Resource {
        let uri = reification_uri(resource_uri, property_uri, value_content);
        tracing::trace!(%uri, resource_uri, property_uri, "reification statement");
        let mut statement = Resource::with_expander(&uri, expander);
        statement.add_type(RDF_STATEMENT);
        statement
    }

    /// Is this resource typed `rdf:Statement`?
    pub fn is_statement(&self) -> bool {
        self.has_type(RDF_STATEMENT)
    }
}

/// Statement resource for `value` of `property` on `resource`.
pub fn reification_statement(resource: &Resource, property: &Property, value: &Value) -> Resource {
    Resource::reification(
        resource.uri(),
        property.uri(),
        value.content(),
        resource.expander().clone(),
    )
}
