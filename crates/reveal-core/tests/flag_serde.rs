//! Lenient `Flag` deserialization from JSON payloads.

use reveal_core::Flag;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Props {
    #[serde(default)]
    hide: Flag,
}

fn hide_of(json: &str) -> bool {
    serde_json::from_str::<Props>(json).unwrap().hide.get()
}

#[test]
fn accepts_real_bools() {
    assert!(hide_of(r#"{"hide": true}"#));
    assert!(!hide_of(r#"{"hide": false}"#));
}

#[test]
fn accepts_stringly_typed_bools() {
    assert!(hide_of(r#"{"hide": "true"}"#));
    assert!(!hide_of(r#"{"hide": "false"}"#));
    assert!(!hide_of(r#"{"hide": ""}"#));
    assert!(hide_of(r#"{"hide": "yes"}"#));
}

#[test]
fn accepts_numbers_and_null() {
    assert!(hide_of(r#"{"hide": 1}"#));
    assert!(!hide_of(r#"{"hide": 0}"#));
    assert!(!hide_of(r#"{"hide": 0.0}"#));
    assert!(!hide_of(r#"{"hide": null}"#));
}

#[test]
fn missing_field_defaults_to_false() {
    assert!(!hide_of("{}"));
}

#[test]
fn rejects_structured_values() {
    assert!(serde_json::from_str::<Props>(r#"{"hide": [true]}"#).is_err());
}

#[test]
fn serializes_as_strict_bool() {
    let json = serde_json::to_string(&Flag::from("on")).unwrap();
    assert_eq!(json, "true");
}
