//! JSON normalization of nested runtime values.

use sambhar_core::serializer::{RawValue, Serializer};
use sambhar_core::test_fixtures::midnight;
use serde_json::json;

#[test]
fn test_nested_round_trip_preserves_text() {
    let value = RawValue::map([
        ("city", RawValue::from("München")),
        ("greeting", RawValue::from("नमस्ते 🌟")),
        (
            "readings",
            RawValue::array([RawValue::Float(1.5), RawValue::Float(f64::NAN), RawValue::Int(-3)]),
        ),
        (
            "nested",
            RawValue::map([
                ("when", RawValue::Timestamp(midnight(2024, 2, 29))),
                ("tags", RawValue::List(vec!["ü".into(), "ß".into(), RawValue::Missing])),
            ]),
        ),
    ]);

    let json = Serializer::new().ensure_serializable(&value);
    let text = serde_json::to_string(&json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, json);
    assert_eq!(parsed["city"], "München");
    assert_eq!(parsed["greeting"], "नमस्ते 🌟");
    assert_eq!(parsed["readings"], json!([1.5, null, -3]));
    assert_eq!(parsed["nested"]["when"], "2024-02-29T00:00:00");
    assert_eq!(parsed["nested"]["tags"], json!(["ü", "ß", null]));
}

#[test]
fn test_tables_and_series() {
    let table = RawValue::Table(vec![
        ("x".to_string(), vec![RawValue::Int(1), RawValue::Int(2)]),
        ("y".to_string(), vec![RawValue::Float(f64::INFINITY), RawValue::Missing]),
    ]);
    let series = RawValue::Series {
        labels: vec!["first".to_string(), "second".to_string()],
        values: vec![RawValue::Bool(true), RawValue::Float(f64::NEG_INFINITY)],
    };

    let serializer = Serializer::new();
    assert_eq!(
        serializer.ensure_serializable(&table),
        json!({"x": [1, 2], "y": ["inf", null]})
    );
    assert_eq!(serializer.ensure_serializable(&series), json!([true, "-inf"]));
}

#[test]
fn test_non_string_keys_and_fallbacks() {
    let value = RawValue::Map(vec![
        (RawValue::Int(1), RawValue::Complex { re: 1.0, im: -2.0 }),
        (RawValue::Bool(false), RawValue::opaque(std::net::Ipv4Addr::LOCALHOST)),
        (RawValue::Missing, RawValue::UInt(7)),
    ]);

    let json = Serializer::new().ensure_serializable(&value);
    assert_eq!(
        json,
        json!({"1": "(1-2j)", "false": "127.0.0.1", "null": 7})
    );
}

#[test]
fn test_direct_and_normalized_paths_agree() {
    let native = RawValue::map([
        ("a", RawValue::array([1i64, 2, 3])),
        ("b", RawValue::from("text")),
        ("c", RawValue::Float(0.25)),
    ]);

    let serializer = Serializer::new();
    assert_eq!(serializer.ensure_serializable(&native), serializer.to_json(&native));
}
