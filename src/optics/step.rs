//! Primitive optic steps.

use std::fmt;
use std::sync::Arc;

use super::Cardinality;
use crate::value::{Key, Value};

/// A shared test on a focused value, used by [`Step::When`] and [`Step::Find`].
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a test function.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(test))
    }

    /// Runs the test.
    #[must_use]
    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Predicate").finish_non_exhaustive()
    }
}

/// One link of an optic.
#[derive(Clone, Debug)]
pub enum Step {
    /// Lens onto the child at `key`; the child must exist.
    Prop(Key),
    /// Prism onto the child at `key`, absent when the key is missing.
    At(Key),
    /// Prism onto the current value unless it is `null`.
    Optional,
    /// Prism onto the current value when the predicate holds.
    When(Predicate),
    /// Prism onto the first child for which the predicate holds.
    Find(Predicate),
    /// Traversal over every child: list elements, or record values in key order.
    Elems,
}

impl Step {
    /// Cardinality contributed by this step.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        match self {
            Self::Prop(_) => Cardinality::Lens,
            Self::At(_) | Self::Optional | Self::When(_) | Self::Find(_) => Cardinality::Prism,
            Self::Elems => Cardinality::Traversal,
        }
    }

    /// Returns `true` for steps that move from a container to one of its children.
    pub(crate) const fn selects_child(&self) -> bool {
        matches!(self, Self::Prop(_) | Self::At(_) | Self::Find(_) | Self::Elems)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prop(Key::Index(index)) => write!(formatter, "[{index}]"),
            Self::Prop(Key::Symbol(symbol)) => write!(formatter, "[{symbol}]"),
            Self::Prop(key) => write!(formatter, ".{key}"),
            Self::At(Key::Index(index)) => write!(formatter, "[{index}]?"),
            Self::At(Key::Symbol(symbol)) => write!(formatter, "[{symbol}]?"),
            Self::At(key) => write!(formatter, ".{key}?"),
            Self::Optional => formatter.write_str("?"),
            Self::When(_) => formatter.write_str("[?when]"),
            Self::Find(_) => formatter.write_str("[?find]"),
            Self::Elems => formatter.write_str("[*]"),
        }
    }
}
