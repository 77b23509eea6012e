use bilan_extractor::*;
use serde_json::{json, Map, Value};

fn catalog() -> Catalog {
    let config: CatalogConfig = serde_json::from_value(json!({
        "default_variables": [
            {
                "name": "actif_total",
                "description": "Total de l'actif",
                "aliases": ["actif total", "actiftotal", "total actif"]
            },
            { "name": "passif_total", "aliases": ["passif total"] },
            { "name": "capitaux_propres", "aliases": ["capitaux propres"] },
            { "name": "resultat_net", "aliases": ["résultat_net", "résultat net"] },
            { "name": "chiffre_affaires", "aliases": ["chiffre d'affaires"] },
            { "name": "dettes", "aliases": ["dette"] }
        ],
        "additional_variables": [
            { "name": "tresorerie", "code": "CF", "aliases": ["trésorerie"] }
        ]
    }))
    .unwrap();
    Catalog::from_config(&config)
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        other => panic!("expected JSON object, got {}", other),
    }
}

#[test]
fn test_prose_wrapped_response_end_to_end() {
    // The model wrapped its JSON in an explanation and produced one
    // non-numeric value; the bad value silently disappears.
    let raw = r#"Voici le résultat: {"actif_total": 1000000, "dettes": "abc"}"#;

    let parsed = parse_model_output(raw);
    assert_eq!(parsed.get("actif_total"), Some(&Value::from(1000000)));
    assert_eq!(parsed.get("dettes"), Some(&Value::from("abc")));

    let vars = resolve(&parsed, &catalog());
    assert_eq!(vars.len(), 1);
    let actif = vars.get("actif_total").unwrap();
    assert_eq!(actif.values.len(), 1);
    assert_eq!(actif.values[0].amount, 1_000_000.0);
    assert_eq!(actif.values[0].value_type, ValueType::Unspecified);
    assert!(!vars.contains("dettes"));
}

#[test]
fn test_empty_response_end_to_end() {
    let parsed = parse_model_output("");
    assert!(parsed.is_empty());

    let vars = resolve(&parsed, &catalog());
    assert!(vars.is_empty());

    let json = vars.to_json().unwrap();
    assert_eq!(json, json!({}));
}

#[test]
fn test_structured_response_end_to_end() {
    let raw = r#"{
        "resultat_net": {
            "values": [
                { "value": "900000", "value_type": "net", "year": 2023 },
                { "value": "bad" }
            ]
        }
    }"#;

    let parsed = parse_model_output(raw);
    let vars = resolve(&parsed, &catalog());

    let resultat = vars.get("resultat_net").unwrap();
    assert_eq!(resultat.values.len(), 1);
    assert_eq!(resultat.values[0].amount, 900_000.0);
    assert_eq!(resultat.values[0].value_type, ValueType::Net);
    assert_eq!(resultat.values[0].fiscal_year, Some(2023));
}

#[test]
fn test_mixed_legacy_and_structured_response() {
    // One model mixing both historical formats: the legacy pass runs first,
    // then the structured pass appends to the same variable. No dedup.
    let raw = r#"{
        "dette": 500,
        "dettes": { "values": [ { "value": 100, "year": 2022 } ] }
    }"#;

    let parsed = parse_model_output(raw);
    let vars = resolve(&parsed, &catalog());

    let dettes = vars.get("dettes").unwrap();
    assert_eq!(dettes.values.len(), 2);
    assert_eq!(dettes.values[0].amount, 500.0);
    assert_eq!(dettes.values[0].value_type, ValueType::Unspecified);
    assert_eq!(dettes.values[0].fiscal_year, None);
    assert_eq!(dettes.values[1].amount, 100.0);
    assert_eq!(dettes.values[1].fiscal_year, Some(2022));
}

#[test]
fn test_serialize_resolve_round_trip() {
    let raw = r#"{
        "actif total": 1000000,
        "trésorerie": "50000",
        "resultat_net": {
            "values": [
                { "value": 900000, "value_type": "net", "year": 2023 },
                { "value": 1200000, "value_type": "brut", "year": 2023 },
                { "value": 300000, "value_type": "amortissement", "year": 2023 }
            ],
            "description": "Résultat de l'exercice"
        }
    }"#;

    let cat = catalog();
    let first = resolve(&parse_model_output(raw), &cat);
    assert_eq!(first.len(), 3);
    assert_eq!(
        first.get("tresorerie").unwrap().accounting_code.as_deref(),
        Some("CF")
    );

    let reparsed = as_object(first.to_json().unwrap());
    let second = resolve(&reparsed, &cat);
    assert_eq!(first, second);

    // And the serialized shape is stable under a second trip too.
    let third = resolve(&as_object(second.to_json().unwrap()), &cat);
    assert_eq!(second, third);
}

#[test]
fn test_all_invalid_variable_is_absent_from_output() {
    let raw = r#"{
        "chiffre_affaires": "n/a",
        "dettes": { "values": [ { "value": null }, { "value": "oops" } ] },
        "capitaux propres": 75000
    }"#;

    let vars = resolve(&parse_model_output(raw), &catalog());
    assert!(!vars.contains("chiffre_affaires"));
    assert!(!vars.contains("dettes"));
    assert!(vars.contains("capitaux_propres"));
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_output_shape_matches_downstream_contract() {
    let raw = r#"{
        "resultat_net": {
            "values": [ { "value": 900000, "value_type": "net", "year": 2023 } ],
            "code": "HN",
            "description": "Résultat net"
        },
        "dette": 500
    }"#;

    let json = resolve(&parse_model_output(raw), &catalog())
        .to_json()
        .unwrap();

    assert_eq!(
        json["resultat_net"],
        json!({
            "name": "resultat_net",
            "values": [ { "value": 900000.0, "value_type": "net", "year": 2023 } ],
            "code": "HN",
            "description": "Résultat net"
        })
    );
    assert_eq!(
        json["dettes"],
        json!({
            "name": "dettes",
            "values": [ { "value": 500.0, "value_type": "unspecified", "year": null } ]
        })
    );
}

#[test]
fn test_garbage_response_degrades_to_empty_output() {
    for raw in [
        "je n'ai pas trouvé de bilan dans ce document",
        "```\nrien\n```",
        "[1, 2, 3]",
        "{]",
    ] {
        let vars = resolve(&parse_model_output(raw), &catalog());
        assert!(vars.is_empty(), "expected empty output for {:?}", raw);
    }
}

#[test]
fn test_empty_catalog_still_resolves_raw_keys() {
    let raw = r#"{"actif_total": 1000, "Actif Total": 2000}"#;
    let vars = resolve(&parse_model_output(raw), &Catalog::empty());

    // Without aliases the two spellings stay distinct raw keys.
    assert_eq!(vars.len(), 2);
    assert!(vars.contains("actif_total"));
    assert!(vars.contains("Actif Total"));
}
