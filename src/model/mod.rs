//! # Resource Model
//!
//! In-memory representation of one RDF subject and its attributes:
//! language-aware, multi-valued, reifiable.
//!
//! Design rule: no wire formats and no transport types here.
//! This module is pure data: no I/O, no async.

pub mod value;
pub mod language;
pub mod property;
pub mod resource;
pub mod reification;
pub mod vocab;

pub use value::Value;
pub use language::{LanguageFilter, LanguageMode};
pub use property::{Property, PropertyKind, PropertyRef};
pub use resource::{Expander, Resource};
pub use reification::{reification_statement, reification_uri};
