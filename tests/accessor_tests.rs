//! Integration tests for accessor normalization.
//!
//! Every accessor shape naming the same logical path must read and write the
//! same way.

#![forbid(unsafe_code)]

use proform::accessor::{AccessorProp, parse_accessor, parse_accessor_value};
use proform::optics::{self, Optic};
use proform::value::{Key, Symbol, Value};
use proform::{list, record};
use rstest::rstest;

fn root() -> Value {
    record! {
        "contact" => record! { "address" => "Main St", "city" => "Paris" },
        "items" => list![record! { "name" => "pen" }],
        "a.b" => "dotted key",
    }
}

#[rstest]
#[case(AccessorProp::from("contact.address"))]
#[case(AccessorProp::from(["contact", "address"]))]
#[case(AccessorProp::from(vec![Key::from("contact"), Key::from("address")]))]
#[case(AccessorProp::from(optics::path(["contact", "address"])))]
#[case(AccessorProp::from(proform::path::Path::root().key("contact").key("address")))]
fn test_shapes_are_equivalent(#[case] accessor: AccessorProp) {
    let optic = parse_accessor(accessor);

    assert!(optic.is_lens());
    assert_eq!(optic.view(&root()).unwrap(), Value::from("Main St"));
    let updated = optic.set(Value::from("Side St"), &root()).unwrap();
    assert_eq!(
        optics::dotted("contact.address").view(&updated).unwrap(),
        Value::from("Side St")
    );
}

#[rstest]
fn test_dotted_segments_reach_list_elements() {
    let name = parse_accessor("items.0.name");
    assert_eq!(name.view(&root()).unwrap(), Value::from("pen"));
}

#[rstest]
fn test_path_keys_are_never_split() {
    assert_eq!(
        parse_accessor(["a.b"]).view(&root()).unwrap(),
        Value::from("dotted key")
    );
    assert!(parse_accessor("a.b").view(&root()).is_err());
}

#[rstest]
fn test_symbol_key() {
    let id = Symbol::new("id");
    let root = Value::record([(Key::from(id.clone()), Value::from(7))]);

    assert_eq!(parse_accessor(id).view(&root).unwrap(), Value::from(7));
    assert!(parse_accessor(Symbol::new("id")).view(&root).is_err());
}

#[rstest]
fn test_index_key_on_list() {
    let list = list!["x", "y"];
    assert_eq!(parse_accessor(1usize).view(&list).unwrap(), Value::from("y"));
}

#[rstest]
fn test_empty_dotted_string_is_identity() {
    let optic = parse_accessor("");
    assert_eq!(optic.view(&root()).unwrap(), root());
}

#[rstest]
fn test_optic_identity_is_preserved() {
    let optic = optics::prop("items").elems();
    let accessor = AccessorProp::from(&optic);

    assert!(accessor.is_optic());
    assert!(Optic::ptr_eq(accessor.as_optic().unwrap(), &optic));
    assert!(Optic::ptr_eq(&parse_accessor(accessor), &optic));
}

#[rstest]
fn test_parsing_builds_fresh_optics() {
    assert_ne!(parse_accessor("contact"), parse_accessor("contact"));
}

#[rstest]
fn test_dynamic_values() {
    let from_list = parse_accessor_value(&list!["items", 0, "name"]).unwrap();
    let from_string = parse_accessor_value(&Value::from("items.0.name")).unwrap();

    assert_eq!(from_list.view(&root()).unwrap(), from_string.view(&root()).unwrap());
}

#[rstest]
fn test_invalid_dynamic_value_is_reported() {
    let value = record! { "not" => "an accessor" };

    let error = parse_accessor_value(&value).unwrap_err();

    assert_eq!(error.value, value);
    assert!(error.to_string().starts_with("invalid accessor"));
}
