//! Property-based tests for Traversal and Prism laws.
//!
//! - **Modify Identity Law**: `traversal.modify(|x| x, &source) == source`
//! - **Modify Composition Law**:
//!   `traversal.modify(g, &traversal.modify(f, &source)) == traversal.modify(|x| g(f(x)), &source)`
//! - **Prism absence**: writes through an absent focus return the source unchanged

use proform::optics;
use proform::record;
use proform::value::Value;
use proptest::prelude::*;

fn numbers() -> impl Strategy<Value = Value> {
    prop::collection::vec(any::<i16>(), 0..12).prop_map(|numbers| record! { "numbers" => numbers })
}

fn add(amount: i64) -> impl Fn(Value) -> Value {
    move |value| Value::from(value.as_i64().unwrap_or(0) + amount)
}

fn scale(factor: i64) -> impl Fn(Value) -> Value {
    move |value| Value::from(value.as_i64().unwrap_or(0) * factor)
}

proptest! {
    /// Modify Identity Law
    #[test]
    fn prop_modify_identity_law(source in numbers()) {
        let traversal = optics::prop("numbers").elems();
        let result = traversal.modify(|value| value, &source).unwrap();
        prop_assert!(result.shares_with(&source));
    }

    /// Modify Composition Law
    #[test]
    fn prop_modify_composition_law(source in numbers(), amount in -100_i64..100, factor in -5_i64..5) {
        let traversal = optics::prop("numbers").elems();
        let (f, g) = (add(amount), scale(factor));

        let sequential = traversal.modify(&g, &traversal.modify(&f, &source).unwrap()).unwrap();
        let composed = traversal.modify(|value| g(f(value)), &source).unwrap();

        prop_assert_eq!(sequential, composed);
    }

    /// Set then collect yields the set value once per focus
    #[test]
    fn prop_set_then_collect(source in numbers(), value in any::<i32>()) {
        let traversal = optics::prop("numbers").elems();
        let count = traversal.collect(&source).unwrap().len();

        let updated = traversal.set(Value::from(value), &source).unwrap();

        prop_assert_eq!(traversal.collect(&updated).unwrap(), vec![Value::from(value); count]);
    }

    /// Writes through an out-of-range index leave the source untouched
    #[test]
    fn prop_absent_prism_set_is_identity(source in numbers(), offset in 0_usize..4, value in any::<i32>()) {
        let len = source.get("numbers").map_or(0, Value::len);
        let prism = optics::prop("numbers").at(len + offset);

        let updated = prism.set(Value::from(value), &source).unwrap();

        prop_assert!(updated.shares_with(&source));
        prop_assert_eq!(prism.preview(&source).unwrap(), None);
    }

    /// Optional set on a present focus behaves like a Lens set
    #[test]
    fn prop_optional_present_behaves_like_lens(first in any::<i32>(), value in any::<i32>()) {
        let source = record! { "first" => first };
        let prism = optics::prop("first").optional();
        let lens = optics::prop("first");

        prop_assert_eq!(
            prism.set(Value::from(value), &source).unwrap(),
            lens.set(Value::from(value), &source).unwrap()
        );
    }
}
