use pokedex_core::{
    load_config, ConfigError, JsonDocumentSource, RecordSource, SourceError, WeightPolicy,
};
use std::io::Write;
use tempfile::NamedTempFile;

const POKEDEX_JSON: &str = r#"{
  "pokemonList": [
    { "id": 1, "num": "001", "name": "Bulbasaur", "type": ["Grass", "Poison"], "weight": "6.9 kg" },
    { "id": 4, "num": "004", "name": "Charmander", "type": "Fire", "weight": "8.5 kg" },
    { "id": 132, "num": "132", "name": "Ditto", "type": ["Normal"], "weight": "unknown" }
  ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes()).expect("temp file should be writable");
    file.flush().expect("temp file should flush");
    file
}

#[test]
fn load_reads_records_in_document_order() {
    let file = write_temp(POKEDEX_JSON);

    let pokedex = JsonDocumentSource::new(file.path())
        .load()
        .expect("document should load");

    assert_eq!(pokedex.names(), vec!["Bulbasaur", "Charmander", "Ditto"]);
    let charmander = pokedex.get(1).expect("second record should exist");
    assert_eq!(charmander.types, vec!["Fire"]);
    assert_eq!(pokedex.weight_policy(), WeightPolicy::Strict);
    assert_eq!(pokedex.total_weight(), 0.0);
}

#[test]
fn load_applies_configured_weight_policy() {
    let file = write_temp(POKEDEX_JSON);

    let pokedex = JsonDocumentSource::new(file.path())
        .with_weight_policy(WeightPolicy::LeadingNumber)
        .load()
        .expect("document should load");

    assert!((pokedex.total_weight() - 15.4).abs() < 1e-9);
    let heaviest = pokedex.heaviest().expect("lenient weights should parse");
    assert_eq!(heaviest.name, "Charmander");
}

#[test]
fn load_uses_custom_list_field() {
    let file = write_temp(r#"{"entries":[{"id":7,"name":"Squirtle","type":["Water"],"weight":"9.0"}]}"#);

    let source = JsonDocumentSource::new(file.path()).with_list_field("entries");
    assert_eq!(source.list_field(), "entries");

    let pokedex = source.load().expect("custom list field should load");
    assert_eq!(pokedex.count(), 1);
    let water = pokedex
        .first_by_type_tag("Water")
        .expect("a Water record should be found");
    assert_eq!(water.name, "Squirtle");
}

#[test]
fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("missing.json");

    let err = JsonDocumentSource::new(&path)
        .load()
        .expect_err("missing file should fail to load");
    assert!(matches!(err, SourceError::Unavailable { .. }));
    assert!(err.to_string().contains("missing.json"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn invalid_json_is_malformed() {
    let file = write_temp("{ not json");

    let err = JsonDocumentSource::new(file.path())
        .load()
        .expect_err("invalid JSON should fail to load");
    assert!(matches!(err, SourceError::Malformed { .. }));
}

#[test]
fn record_schema_mismatch_is_malformed() {
    let file = write_temp(r#"{"pokemonList":[{"id":"one","name":"Bulbasaur"}]}"#);

    let err = JsonDocumentSource::new(file.path())
        .load()
        .expect_err("string id should fail to load");
    assert!(matches!(err, SourceError::Malformed { .. }));
}

#[test]
fn absent_list_field_is_reported_by_name() {
    let file = write_temp(r#"{"pokemon":[]}"#);

    let err = JsonDocumentSource::new(file.path())
        .load()
        .expect_err("absent list field should fail to load");
    match err {
        SourceError::MissingListField { field, .. } => assert_eq!(field, "pokemonList"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_config_reads_partial_document_with_defaults() {
    let file = write_temp(
        r#"{
            "source": { "path": "data/pokedex.json" },
            "weight_policy": "leading_number",
            "tour": { "min_weight": 25.5, "filter_tags": ["Water"] }
        }"#,
    );

    let config = load_config(file.path()).expect("partial config should load");
    assert_eq!(config.source.path, std::path::PathBuf::from("data/pokedex.json"));
    assert_eq!(config.source.list_field, "pokemonList");
    assert_eq!(config.weight_policy, WeightPolicy::LeadingNumber);
    assert_eq!(config.tour.min_weight, 25.5);
    assert_eq!(config.tour.filter_tags, vec!["Water"]);
    assert_eq!(config.tour.find_tag, "Water");
    assert_eq!(config.tour.appended.name, "Tortank Gigamax");

    let source = config.record_source();
    assert_eq!(source.path(), std::path::Path::new("data/pokedex.json"));
}

#[test]
fn load_config_surfaces_parse_and_validation_errors() {
    let broken = write_temp(r#"{"weight_policy": "fuzzy"}"#);
    assert!(matches!(
        load_config(broken.path()).expect_err("unknown weight policy should fail"),
        ConfigError::Parse { .. }
    ));

    let invalid = write_temp(r#"{"tour": {"find_tag": ""}}"#);
    let err = load_config(invalid.path()).expect_err("empty find_tag should fail validation");
    assert!(matches!(err, ConfigError::Invalid(ref message) if message.contains("find_tag")));

    let dir = tempfile::tempdir().expect("temp dir should be created");
    assert!(matches!(
        load_config(dir.path().join("absent.json")).expect_err("absent config should fail"),
        ConfigError::Read { .. }
    ));
}

fn workspace_file(relative: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

#[test]
fn bundled_pokedex_document_loads() {
    let pokedex = JsonDocumentSource::new(workspace_file("pokedex_database.json"))
        .load()
        .expect("bundled document should load");

    assert_eq!(pokedex.count(), 17);
    let pikachu = pokedex
        .iter()
        .find(|record| record.name == "Pikachu")
        .expect("Pikachu should be bundled");
    assert_eq!(pikachu.types, vec!["Electric"]);
    let heaviest = pokedex.heaviest().expect("bundled weights should parse");
    assert_eq!(heaviest.name, "Snorlax");
    assert!(pokedex.any_by_type_tag("Dragon"));
    assert_eq!(pokedex.sorted_by_weight_ascending().count(), 16);
}

#[test]
fn example_config_is_valid() {
    let config = load_config(workspace_file("config/pokedex.example.json"))
        .expect("example config should load");

    assert_eq!(config.tour.replacement.name, "Charizard Gigamax");
    assert_eq!(config.weight_policy, WeightPolicy::Strict);
}
