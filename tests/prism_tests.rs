//! Unit tests for Prism optics.
//!
//! Tests cover:
//! - Absent foci on read and write
//! - `at`, `optional`, `when` and `find` steps
//! - Cardinality widening under composition

#![forbid(unsafe_code)]

use proform::error::AccessError;
use proform::optics::{self, Cardinality, Focus};
use proform::value::Value;
use proform::{list, record};
use rstest::rstest;

// =============================================================================
// Test Data
// =============================================================================

fn profile() -> Value {
    record! {
        "nickname" => Value::Null,
        "emails" => list!["a@example.com"],
        "users" => list![
            record! { "id" => 1, "name" => "Alice" },
            record! { "id" => 2, "name" => "Bob" },
        ],
    }
}

// =============================================================================
// Reading
// =============================================================================

#[rstest]
fn test_at_reads_present_and_absent() {
    let root = profile();

    assert_eq!(
        optics::prop("emails").at(0usize).get(&root).unwrap(),
        Focus::Maybe(Some(Value::from("a@example.com")))
    );
    assert_eq!(
        optics::prop("emails").at(3usize).get(&root).unwrap(),
        Focus::Maybe(None)
    );
}

#[rstest]
fn test_lens_prefix_of_prism_does_not_fail() {
    let root = profile();
    let optic = optics::prop("missing").at("x");

    assert_eq!(optic.get(&root).unwrap(), Focus::Maybe(None));
    assert!(matches!(
        optics::prop("missing").get(&root),
        Err(AccessError::MissingKey { .. })
    ));
}

#[rstest]
fn test_optional_is_absent_on_null() {
    let root = profile();
    let nickname = optics::prop("nickname").optional();

    assert!(nickname.is_prism());
    assert_eq!(nickname.preview(&root).unwrap(), None);
}

#[rstest]
fn test_prism_through_scalar_is_absent() {
    let root = record! { "a" => 1 };
    let optic = optics::prop("a").at("b").prop("c");

    assert_eq!(optic.cardinality(), Cardinality::Prism);
    assert_eq!(optic.get(&root).unwrap(), Focus::Maybe(None));
}

#[rstest]
fn test_find_selects_first_match() {
    let root = profile();
    let bob = optics::prop("users")
        .find(|user| user.get("id").and_then(Value::as_i64) == Some(2))
        .prop("name");

    assert_eq!(bob.preview(&root).unwrap(), Some(Value::from("Bob")));
}

// =============================================================================
// Writing
// =============================================================================

#[rstest]
fn test_set_on_absent_focus_returns_source() {
    let root = profile();
    let optic = optics::prop("emails").at(5usize);

    let updated = optic.set(Value::from("x"), &root).unwrap();

    assert!(updated.shares_with(&root));
}

#[rstest]
fn test_set_on_present_focus_behaves_like_lens() {
    let root = profile();
    let optic = optics::prop("emails").at(0usize);

    let updated = optic.set(Value::from("b@example.com"), &root).unwrap();

    assert_eq!(updated.get("emails"), Some(&list!["b@example.com"]));
}

#[rstest]
fn test_when_guards_modification() {
    let root = record! { "age" => 15 };
    let adult = optics::prop("age").when(|age| age.as_i64().is_some_and(|age| age >= 18));

    let unchanged = adult.modify(|_| Value::from(0), &root).unwrap();

    assert!(unchanged.shares_with(&root));
}

#[rstest]
fn test_find_modifies_only_the_match() {
    let root = profile();
    let alice = optics::prop("users").find(|user| user.get("name").and_then(Value::as_str) == Some("Alice"));

    let updated = alice
        .prop("name")
        .set(Value::from("Alicia"), &root)
        .unwrap();

    let users = updated.get("users").unwrap();
    assert_eq!(users.get(0usize).and_then(|user| user.get("name")), Some(&Value::from("Alicia")));
    assert!(users.get(1usize).unwrap().shares_with(root.get("users").and_then(|users| users.get(1usize)).unwrap()));
}

// =============================================================================
// Composition
// =============================================================================

#[rstest]
#[case(optics::prop("a"), optics::prop("b"), Cardinality::Lens)]
#[case(optics::prop("a"), optics::prop("b").optional(), Cardinality::Prism)]
#[case(optics::prop("a").at(0usize), optics::prop("b"), Cardinality::Prism)]
#[case(optics::prop("a").optional(), optics::prop("b").elems(), Cardinality::Traversal)]
#[case(optics::prop("a").elems(), optics::prop("b").optional(), Cardinality::Traversal)]
fn test_composition_widens(
    #[case] first: optics::Optic,
    #[case] second: optics::Optic,
    #[case] expected: Cardinality,
) {
    assert_eq!(optics::compose(&first, &second).cardinality(), expected);
}
