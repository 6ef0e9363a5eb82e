//! # wsf-rs: RDF Resource Model for Linked-Data Web Services
//!
//! The in-memory half of a client for CRUD/search/SPARQL-over-HTTP
//! linked-data services: one subject, its types, and its language-aware,
//! multi-valued, reifiable properties.
//!
//! ## Design Principles
//!
//! 1. **Reads never fail**: lookup misses degrade to an empty property,
//!    a sentinel value, or the `owl:Thing` type
//! 2. **URIs are stored expanded**: every subject, property and type goes
//!    through a `UriExpander` on the way in
//! 3. **Language is a view**: a resource's language settings filter reads
//!    of datatype properties and never touch stored values
//! 4. **Transport owns nothing here**: decoded records come in, resources
//!    come out
//!
//! ## Quick Start
//!
//! ```rust
//! use wsf_rs::{Resource, Property, Value};
//!
//! let mut person = Resource::new("http://example.org/ada");
//! person.add_type("foaf:Person");
//!
//! let mut name = Property::new("foaf:name");
//! name.add_value(Value::new("Ada").with_language("en"));
//! name.add_value(Value::new("Ada (fr)").with_language("fr"));
//! person.add_property(name);
//!
//! person.set_language(Some("fr"));
//! assert_eq!(person.property("foaf:name").value(1).content(), "Ada (fr)");
//! ```
//!
//! ## Importing service results
//!
//! ```rust
//! let json = r#"{
//!     "uri": "http://ex/1",
//!     "type": ["http://ex/Person"],
//!     "http://ex/name": [{"value": "Alice", "lang": "en", "type": null}]
//! }"#;
//! let alice = wsf_rs::Resource::from_json(json)?;
//! assert_eq!(alice.types(), vec!["http://ex/Person"]);
//! # Ok::<(), wsf_rs::Error>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod namespace;
pub mod import;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Value, Property, PropertyKind, PropertyRef, Resource, Expander,
    LanguageFilter, LanguageMode,
    reification_statement, reification_uri,
};

// ============================================================================
// Re-exports: Namespaces, Import, Export, Config
// ============================================================================

pub use namespace::{Namespaces, UriExpander, Verbatim};
pub use import::{SubjectRecord, ValueDescriptor, import_subjects_json};
pub use export::{to_ntriples, write_ntriples};
pub use config::ImportConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
