#![cfg(feature = "serde")]

//! Integration tests for serde support in proform.
//!
//! These tests verify that buffers convert to and from JSON and that typed
//! data can move through a buffer edit and back.

use proform::optics;
use proform::value::{Key, Symbol, Value, json};
use proform::{list, record};
use rstest::rstest;
use serde::{Deserialize, Serialize};

// =============================================================================
// Value Integration Tests
// =============================================================================

#[rstest]
fn test_value_json_roundtrip() {
    let value = record! {
        "name" => "Alice",
        "age" => 30,
        "score" => 9.5,
        "tags" => list!["a", "b"],
        "nickname" => Value::Null,
    };

    let text = serde_json::to_string(&value).unwrap();
    let restored: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(restored, value);
}

#[rstest]
fn test_symbol_fields_are_not_serialized() {
    let value = Value::record([
        (Key::from(Symbol::new("internal")), Value::from(1)),
        (Key::from("visible"), Value::from(2)),
    ]);

    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"visible":2}"#);
}

// =============================================================================
// Typed Integration Tests
// =============================================================================

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Signup {
    email: String,
    newsletter: bool,
    interests: Vec<String>,
}

#[rstest]
fn test_typed_data_through_an_edit() {
    let signup = Signup {
        email: String::new(),
        newsletter: false,
        interests: vec!["rust".to_owned()],
    };
    let buffer = json::to_value(&signup).unwrap();

    let buffer = optics::prop("email")
        .set(Value::from("a@example.com"), &buffer)
        .unwrap();
    let buffer = optics::prop("newsletter").set(Value::from(true), &buffer).unwrap();

    let restored: Signup = json::from_value(&buffer).unwrap();
    assert_eq!(
        restored,
        Signup {
            email: "a@example.com".to_owned(),
            newsletter: true,
            interests: vec!["rust".to_owned()],
        }
    );
}

#[rstest]
fn test_shape_mismatch_is_reported() {
    let buffer = record! { "email" => 1, "newsletter" => false, "interests" => list![] };

    assert!(json::from_value::<Signup>(&buffer).is_err());
}

#[rstest]
fn test_serde_json_value_conversion() {
    let json = serde_json::json!({ "items": [{ "id": 1 }, { "id": 2 }] });
    let buffer = Value::from(json);

    let ids = optics::prop("items").elems().prop("id").collect(&buffer).unwrap();

    assert_eq!(ids, vec![Value::from(1), Value::from(2)]);
}
