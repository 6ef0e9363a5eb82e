//! Import a service result set, then export it as N-Triples.
//!
//! Runs with a `tracing` test subscriber installed so import/overwrite
//! events show up under `RUST_LOG=wsf_rs=trace cargo test -- --nocapture`.

use wsf_rs::{import_subjects_json, reification_uri, to_ntriples, write_ntriples, Resource};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const RESULT_SET: &str = r#"{
    "subjects": [
        {
            "uri": "http://ex/1",
            "type": ["foaf:Person"],
            "prefLabel": "Alice",
            "foaf:name": [{"value": "Alice", "lang": "en", "type": null,
                           "reify": {"http://ex/confidence": "0.9"}}],
            "foaf:knows": [{"uri": "http://ex/2"}]
        },
        {
            "uri": "http://ex/2",
            "foaf:age": [{"value": "36", "type": "xsd:integer"}]
        }
    ]
}"#;

#[test]
fn test_result_set_import() {
    init_tracing();
    let resources = import_subjects_json(RESULT_SET).unwrap();
    assert_eq!(resources.len(), 2);

    let alice = &resources[0];
    assert_eq!(alice.types(), vec!["http://xmlns.com/foaf/0.1/Person"]);
    assert_eq!(alice.property_count(), 2);
    assert!(alice.property("foaf:knows").is_object());

    let bob = &resources[1];
    // Datatype URIs are kept as given; only subjects, properties and types are expanded.
    assert_eq!(bob.property("foaf:age").value(1).datatype(), Some("xsd:integer"));
}

#[test]
fn test_export_alice() {
    init_tracing();
    let resources = import_subjects_json(RESULT_SET).unwrap();
    let out = to_ntriples(&resources[0]).unwrap();
    let node = format!(
        "_:r{}",
        reification_uri("http://ex/1", "http://xmlns.com/foaf/0.1/name", "Alice")
    );

    let expected = format!(
        "\
<http://ex/1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://xmlns.com/foaf/0.1/Person> .
<http://ex/1> <http://xmlns.com/foaf/0.1/name> \"Alice\"@en .
{node} <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement> .
{node} <http://www.w3.org/1999/02/22-rdf-syntax-ns#subject> <http://ex/1> .
{node} <http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate> <http://xmlns.com/foaf/0.1/name> .
{node} <http://www.w3.org/1999/02/22-rdf-syntax-ns#object> \"Alice\"@en .
{node} <http://ex/confidence> \"0.9\" .
<http://ex/1> <http://xmlns.com/foaf/0.1/knows> <http://ex/2> .
"
    );
    pretty_assertions::assert_eq!(out, expected);
}

#[test]
fn test_write_ntriples_matches_to_ntriples() {
    let mut r = Resource::new("http://ex/1");
    r.add_type("http://ex/T");
    let mut buf = Vec::new();
    write_ntriples(&r, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), to_ntriples(&r).unwrap());
}
