//! Building resources from decoded subject records.
//!
//! A result-set parser hands over one record per subject:
//!
//! ```text
//! { "uri": "http://ex/1",
//!   "type": ["http://ex/Person"],
//!   "http://ex/name":  [{ "value": "Alice", "lang": "en", "type": null,
//!                         "reify": { "http://ex/confidence": "0.9" } }],
//!   "http://ex/knows": [{ "uri": "http://ex/2" }] }
//! ```
//!
//! `import_subject` turns that into `Property`/`Value`/statement objects on a
//! `Resource`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::config::ImportConfig;
use crate::model::vocab::RESERVED_KEYS;
use crate::model::{Property, Resource, Value};
use crate::{Error, Result};

/// One entry in a record's value list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDescriptor {
    /// Reference to another resource.
    Reference {
        uri: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        reify: IndexMap<String, String>,
    },
    /// Literal, optionally language-tagged or typed.
    Literal {
        value: String,
        #[serde(default, alias = "language")]
        lang: Option<String>,
        #[serde(default, rename = "type", alias = "datatype")]
        datatype: Option<String>,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        reify: IndexMap<String, String>,
    },
}

impl ValueDescriptor {
    pub fn reference(uri: impl Into<String>) -> Self {
        Self::Reference { uri: uri.into(), reify: IndexMap::new() }
    }

    pub fn literal(value: impl Into<String>, lang: Option<&str>, datatype: Option<&str>) -> Self {
        Self::Literal {
            value: value.into(),
            lang: lang.map(str::to_owned),
            datatype: datatype.map(str::to_owned),
            reify: IndexMap::new(),
        }
    }

    /// Add a reification predicate/literal pair.
    pub fn with_reification(mut self, predicate: impl Into<String>, literal: impl Into<String>) -> Self {
        match &mut self {
            Self::Reference { reify, .. } | Self::Literal { reify, .. } => {
                reify.insert(predicate.into(), literal.into());
            }
        }
        self
    }

    pub fn reify(&self) -> &IndexMap<String, String> {
        match self {
            Self::Reference { reify, .. } | Self::Literal { reify, .. } => reify,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Reference { uri, .. } => Value::new(uri.as_str()),
            Self::Literal { value, lang, datatype, .. } => {
                Value::literal(value.as_str(), lang.clone(), datatype.clone())
            }
        }
    }
}

/// Decoded attributes of one subject.
///
/// Deserializing goes through [`SubjectRecord::from_json_value`], so serde
/// and `from_json` accept exactly the same documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Json")]
pub struct SubjectRecord {
    pub uri: String,
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    /// Property URI (or reserved keyword) → descriptors, in document order.
    #[serde(flatten)]
    pub attributes: IndexMap<String, Vec<ValueDescriptor>>,
}

impl SubjectRecord {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into(), ..Self::default() }
    }

    pub fn with_type(mut self, uri: impl Into<String>) -> Self {
        self.types.push(uri.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, descriptor: ValueDescriptor) -> Self {
        self.attributes.entry(key.into()).or_default().push(descriptor);
        self
    }

    /// Parse a JSON record.
    ///
    /// The subject may be given as `uri` or `subject`. Reserved keys whose
    /// payload is not a descriptor list (a bare label string, say) are
    /// dropped; any other malformed key is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Json = serde_json::from_str(json)?;
        Self::from_json_value(doc)
    }

    pub fn from_json_value(doc: Json) -> Result<Self> {
        let Json::Object(map) = doc else {
            return Err(Error::InvalidRecord("record is not a JSON object".into()));
        };

        let mut record = SubjectRecord::default();
        for (key, field) in map {
            match key.as_str() {
                "uri" | "subject" => {
                    record.uri = serde_json::from_value(field)
                        .map_err(|e| Error::InvalidRecord(format!("{key}: {e}")))?;
                }
                "type" => {
                    record.types = serde_json::from_value(field)
                        .map_err(|e| Error::InvalidRecord(format!("type: {e}")))?;
                }
                _ => match serde_json::from_value::<Vec<ValueDescriptor>>(field) {
                    Ok(descriptors) => {
                        record.attributes.insert(key, descriptors);
                    }
                    Err(e) if RESERVED_KEYS.contains(&key.as_str()) => {
                        tracing::trace!(key = key.as_str(), error = %e, "reserved key without descriptors dropped");
                    }
                    Err(e) => return Err(Error::InvalidRecord(format!("{key}: {e}"))),
                },
            }
        }

        if record.uri.is_empty() {
            return Err(Error::InvalidRecord("record has no subject uri".into()));
        }
        Ok(record)
    }
}

impl TryFrom<Json> for SubjectRecord {
    type Error = Error;

    fn try_from(doc: Json) -> Result<Self> {
        Self::from_json_value(doc)
    }
}

// ============================================================================
// Import
// ============================================================================

impl Resource {
    /// Populate this resource from `record` with the default [`ImportConfig`].
    pub fn import_subject(&mut self, record: &SubjectRecord) -> &mut Self {
        self.import_subject_with(record, &ImportConfig::default())
    }

    /// Populate this resource from `record`.
    ///
    /// Each descriptor becomes its own `Property` holding a single value, and
    /// `add_property` replaces by URI: when a key lists several descriptors,
    /// only the last one survives the import.
    pub fn import_subject_with(&mut self, record: &SubjectRecord, config: &ImportConfig) -> &mut Self {
        self.set_uri(&record.uri);
        if config.language.is_some() {
            self.set_language(config.language.as_deref());
        }
        if config.strict_language {
            self.strict_language();
        }

        let mut imported = 0usize;
        for (key, descriptors) in &record.attributes {
            if config.is_reserved(key) {
                tracing::trace!(subject = %self.uri(), key = key.as_str(), "reserved key skipped");
                continue;
            }
            let property_uri = self.expander().expand(key);

            for descriptor in descriptors {
                let mut property = Property::new(key.as_str());
                if matches!(descriptor, ValueDescriptor::Reference { .. }) {
                    property.mark_object_property();
                }

                let mut value = descriptor.to_value();
                if !descriptor.reify().is_empty() {
                    let statements = descriptor
                        .reify()
                        .iter()
                        .map(|(predicate, literal)| {
                            let mut statement = Resource::reification(
                                self.uri(),
                                &property_uri,
                                value.content(),
                                self.expander().clone(),
                            );
                            statement.add_property(Property::new(predicate.as_str()).with_value(literal.as_str()));
                            statement
                        })
                        .collect();
                    value.set_reifications(statements);
                }

                property.add_value(value);
                self.add_property(property);
                imported += 1;
            }
        }

        for uri in &record.types {
            self.add_type(uri);
        }

        tracing::debug!(
            subject = %self.uri(),
            values = imported,
            properties = self.property_count(),
            types = record.types.len(),
            "subject imported"
        );
        self
    }

    /// Build a fresh resource from `record`.
    pub fn from_record(record: &SubjectRecord) -> Resource {
        let mut resource = Resource::default();
        resource.import_subject(record);
        resource
    }

    /// Parse a JSON record and build a resource from it.
    pub fn from_json(json: &str) -> Result<Resource> {
        Ok(Resource::from_record(&SubjectRecord::from_json(json)?))
    }
}

/// Import every subject of a JSON result set.
///
/// Accepts a single record, an array of records, or `{ "subjects": [...] }`.
pub fn import_subjects_json(json: &str) -> Result<Vec<Resource>> {
    let doc: Json = serde_json::from_str(json)?;
    let records = match doc {
        Json::Array(items) => items,
        Json::Object(mut map) if map.contains_key("subjects") => match map.remove("subjects") {
            Some(Json::Array(items)) => items,
            _ => return Err(Error::InvalidRecord("`subjects` is not an array".into())),
        },
        single @ Json::Object(_) => vec![single],
        _ => return Err(Error::InvalidRecord("result set is not an object or array".into())),
    };

    records
        .into_iter()
        .map(|doc| SubjectRecord::from_json_value(doc).map(|r| Resource::from_record(&r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::vocab::RDF_STATEMENT;
    use crate::model::{reification_uri, PropertyKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_descriptor_shapes() {
        let r: ValueDescriptor = serde_json::from_str(r#"{"uri": "http://ex/2"}"#).unwrap();
        assert_eq!(r, ValueDescriptor::reference("http://ex/2"));

        let l: ValueDescriptor =
            serde_json::from_str(r#"{"value": "Alice", "lang": "en", "type": null}"#).unwrap();
        assert_eq!(l, ValueDescriptor::literal("Alice", Some("en"), None));

        let typed: ValueDescriptor = serde_json::from_str(
            r#"{"value": "3", "type": "http://www.w3.org/2001/XMLSchema#int", "reify": {"http://ex/c": "0.9"}}"#,
        )
        .unwrap();
        assert_eq!(typed.reify().get("http://ex/c").map(String::as_str), Some("0.9"));
    }

    #[test]
    fn test_record_from_json() {
        let record = SubjectRecord::from_json(
            r#"{
                "subject": "http://ex/1",
                "type": ["http://ex/Person"],
                "prefLabel": "Alice",
                "http://ex/name": [{"value": "Alice"}]
            }"#,
        )
        .unwrap();
        assert_eq!(record.uri, "http://ex/1");
        assert_eq!(record.types, vec!["http://ex/Person"]);
        assert_eq!(record.attributes.len(), 1);
    }

    #[test]
    fn test_serde_matches_from_json() {
        let doc = r#"{
            "subject": "http://ex/1",
            "prefLabel": "Alice",
            "http://ex/name": [{"value": "Alice"}]
        }"#;
        let via_serde: SubjectRecord = serde_json::from_str(doc).unwrap();
        assert_eq!(via_serde, SubjectRecord::from_json(doc).unwrap());
        assert_eq!(via_serde.uri, "http://ex/1");
        assert_eq!(via_serde.attributes.len(), 1);

        let reserialized = serde_json::to_string(&via_serde).unwrap();
        assert_eq!(serde_json::from_str::<SubjectRecord>(&reserialized).unwrap(), via_serde);

        let err = serde_json::from_str::<SubjectRecord>(r#"{"http://ex/p": [{"value": "x"}]}"#).unwrap_err();
        assert!(err.to_string().contains("no subject uri"));
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(SubjectRecord::from_json("[]"), Err(Error::InvalidRecord(_))));
        assert!(matches!(SubjectRecord::from_json("{nope"), Err(Error::Json(_))));
        assert!(matches!(
            SubjectRecord::from_json(r#"{"http://ex/p": [{"value": "x"}]}"#),
            Err(Error::InvalidRecord(_))
        ));
        assert!(matches!(
            SubjectRecord::from_json(r#"{"uri": "http://ex/1", "http://ex/p": "bare"}"#),
            Err(Error::InvalidRecord(msg)) if msg.starts_with("http://ex/p")
        ));
    }

    #[test]
    fn test_import_literal_and_reference() {
        let record = SubjectRecord::new("http://ex/1")
            .with_type("http://ex/Person")
            .with_attribute("http://ex/name", ValueDescriptor::literal("Alice", Some("en"), None))
            .with_attribute("http://ex/knows", ValueDescriptor::reference("http://ex/2"));

        let r = Resource::from_record(&record);
        assert_eq!(r.uri(), "http://ex/1");
        assert_eq!(r.types(), vec!["http://ex/Person"]);

        let name = r.property("http://ex/name");
        assert_eq!(name.kind(), PropertyKind::Datatype);
        assert_eq!(name.value(1).content(), "Alice");
        assert_eq!(name.value(1).language(), Some("en"));

        let knows = r.property("http://ex/knows");
        assert_eq!(knows.kind(), PropertyKind::Object);
        assert_eq!(knows.value(1).content(), "http://ex/2");
    }

    #[test]
    fn test_reserved_keys_are_skipped() {
        let record = SubjectRecord::new("http://ex/1")
            .with_attribute("prefLabel", ValueDescriptor::literal("Alice", None, None))
            .with_attribute("description", ValueDescriptor::literal("A person", None, None))
            .with_attribute("http://ex/name", ValueDescriptor::literal("Alice", None, None));

        let r = Resource::from_record(&record);
        assert_eq!(r.property_count(), 1);
        assert!(!r.property("prefLabel").exists());
    }

    #[test]
    fn test_repeated_key_keeps_last_descriptor() {
        // Every descriptor builds a new Property and add_property replaces by
        // URI, so earlier values for the same key are lost.
        let record = SubjectRecord::new("http://ex/1")
            .with_attribute("http://ex/name", ValueDescriptor::literal("Alice", Some("en"), None))
            .with_attribute("http://ex/name", ValueDescriptor::literal("Alicia", Some("es"), None));

        let r = Resource::from_record(&record);
        let name = r.property("http://ex/name");
        assert_eq!(name.values().len(), 1);
        assert_eq!(name.value(1).content(), "Alicia");
    }

    #[test]
    fn test_reifications_attached_as_set() {
        let record = SubjectRecord::new("http://ex/1").with_attribute(
            "http://ex/name",
            ValueDescriptor::literal("Alice", Some("en"), None)
                .with_reification("http://ex/confidence", "0.9")
                .with_reification("http://ex/source", "census"),
        );

        let r = Resource::from_record(&record);
        let value = r.property("http://ex/name").value(1);
        let statements = value.reifications().unwrap();
        assert_eq!(statements.len(), 2);

        let expected = reification_uri("http://ex/1", "http://ex/name", "Alice");
        for statement in statements {
            assert_eq!(statement.uri(), expected);
            assert_eq!(statement.types(), vec![RDF_STATEMENT]);
            assert_eq!(statement.property_count(), 1);
        }
        let confidence = statements[0].property("http://ex/confidence");
        assert_eq!(confidence.value(1).content(), "0.9");
        assert_eq!(confidence.value(1).language(), None);
        assert_eq!(confidence.value(1).datatype(), None);
        assert_eq!(statements[1].property("http://ex/source").value(1).content(), "census");
    }

    #[test]
    fn test_reified_reference_from_json() {
        let r = Resource::from_json(
            r#"{
                "uri": "http://ex/1",
                "http://ex/knows": [{"uri": "http://ex/2", "reify": {"http://ex/since": "2001"}}]
            }"#,
        )
        .unwrap();

        let knows = r.property("http://ex/knows");
        assert_eq!(knows.kind(), PropertyKind::Object);
        let value = knows.value(1);
        assert_eq!(value.content(), "http://ex/2");

        let statements = value.reifications().unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].uri(), reification_uri("http://ex/1", "http://ex/knows", "http://ex/2"));
        assert_eq!(statements[0].property("http://ex/since").value(1).content(), "2001");
    }

    #[test]
    fn test_no_reify_means_no_reifications() {
        let r = Resource::from_record(
            &SubjectRecord::new("http://ex/1")
                .with_attribute("http://ex/name", ValueDescriptor::literal("Alice", None, None)),
        );
        assert!(r.property("http://ex/name").value(1).reifications().is_none());
    }

    #[test]
    fn test_import_config_language() {
        let record = SubjectRecord::new("http://ex/1")
            .with_attribute("http://ex/name", ValueDescriptor::literal("Alice", Some("en"), None));
        let config = ImportConfig {
            language: Some("fr".into()),
            strict_language: true,
            ..ImportConfig::default()
        };

        let mut r = Resource::default();
        r.import_subject_with(&record, &config);
        assert_eq!(r.language(), Some("fr"));
        assert!(r.is_language_strict());
        assert!(!r.property("http://ex/name").exists());
    }

    #[test]
    fn test_prefixed_keys_are_expanded() {
        let record = SubjectRecord::new("foaf:me")
            .with_type("foaf:Person")
            .with_attribute("foaf:name", ValueDescriptor::literal("Ada", None, None).with_reification("dc:source", "x"));

        let r = Resource::from_record(&record);
        assert_eq!(r.uri(), "http://xmlns.com/foaf/0.1/me");
        assert_eq!(r.types(), vec!["http://xmlns.com/foaf/0.1/Person"]);
        let value = r.property("http://xmlns.com/foaf/0.1/name").value(1);
        assert_eq!(value.content(), "Ada");
        let statement = &value.reifications().unwrap()[0];
        assert_eq!(
            statement.uri(),
            reification_uri("http://xmlns.com/foaf/0.1/me", "http://xmlns.com/foaf/0.1/name", "Ada")
        );
        assert!(statement.property("http://purl.org/dc/elements/1.1/source").exists());
    }

    #[test]
    fn test_import_subjects_json_shapes() {
        let one = r#"{"uri": "http://ex/1"}"#;
        let many = r#"[{"uri": "http://ex/1"}, {"uri": "http://ex/2"}]"#;
        let wrapped = r#"{"subjects": [{"uri": "http://ex/3"}]}"#;

        assert_eq!(import_subjects_json(one).unwrap().len(), 1);
        let uris: Vec<String> = import_subjects_json(many)
            .unwrap()
            .iter()
            .map(|r| r.uri().to_string())
            .collect();
        assert_eq!(uris, vec!["http://ex/1", "http://ex/2"]);
        assert_eq!(import_subjects_json(wrapped).unwrap()[0].uri(), "http://ex/3");
        assert!(import_subjects_json("42").is_err());
        assert!(import_subjects_json(r#"{"subjects": 1}"#).is_err());
    }
}
