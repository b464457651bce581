use pokedex_core::{Record, WeightPolicy};

#[test]
fn record_new_has_no_weight() {
    let record = Record::new(152, "Tortank Gigamax", ["Water"]);

    assert_eq!(record.id, 152);
    assert_eq!(record.name, "Tortank Gigamax");
    assert_eq!(record.types, vec!["Water"]);
    assert_eq!(record.weight, None);
    assert_eq!(record.parsed_weight(WeightPolicy::Strict), None);
}

#[test]
fn has_type_is_case_sensitive_membership() {
    let record = Record::new(6, "Charizard", ["Fire", "Flying"]);

    assert!(record.has_type("Fire"));
    assert!(record.has_type("Flying"));
    assert!(!record.has_type("fire"));
    assert!(!record.has_type("Fir"));
}

#[test]
fn decode_normalizes_single_type_string_to_list() {
    let value = serde_json::json!({
        "id": 25,
        "name": "Pikachu",
        "type": "Electric",
        "weight": "6.0"
    });

    let record: Record = serde_json::from_value(value).expect("single type string should decode");
    assert_eq!(record.types, vec!["Electric"]);
    assert_eq!(record.parsed_weight(WeightPolicy::Strict), Some(6.0));
}

#[test]
fn decode_accepts_missing_or_null_type_and_weight() {
    let missing: Record = serde_json::from_value(serde_json::json!({
        "id": 132,
        "name": "Ditto"
    }))
    .expect("record without type and weight should decode");
    assert!(missing.types.is_empty());
    assert_eq!(missing.weight, None);

    let null_type: Record = serde_json::from_value(serde_json::json!({
        "id": 132,
        "name": "Ditto",
        "type": null
    }))
    .expect("null type should decode");
    assert!(null_type.types.is_empty());
}

#[test]
fn decode_rejects_non_string_type_tags() {
    let err = serde_json::from_value::<Record>(serde_json::json!({
        "id": 1,
        "name": "Bulbasaur",
        "type": [1, 2]
    }))
    .expect_err("numeric type tags should be rejected");
    assert!(err.to_string().contains("invalid type"), "unexpected error: {err}");
}

#[test]
fn serialization_uses_document_field_names() {
    let record = Record::new(1, "Bulbasaur", ["Grass", "Poison"]).with_weight("6.9");

    let json = serde_json::to_value(&record).expect("record should serialize");
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Bulbasaur");
    assert_eq!(json["type"], serde_json::json!(["Grass", "Poison"]));
    assert_eq!(json["weight"], "6.9");

    let unweighed = serde_json::to_value(Record::new(2, "Ivysaur", ["Grass"]))
        .expect("unweighed record should serialize");
    assert!(unweighed.get("weight").is_none());
}

#[test]
fn parsed_weight_follows_policy() {
    let record = Record::new(4, "Charmander", ["Fire"]).with_weight("8.5 kg");

    assert_eq!(record.parsed_weight(WeightPolicy::Strict), None);
    assert_eq!(record.parsed_weight(WeightPolicy::LeadingNumber), Some(8.5));
}
