//! Reading and writing form buffers through accessors.
//!
//! A control reads its value with [`read_buffer`] before each render and
//! produces a new root with [`write_buffer`] on each edit. The caller stores
//! the new root; nothing here keeps state.
//!
//! # Examples
//!
//! ```
//! use proform::accessor::parse_accessor;
//! use proform::buffer::{read_buffer, write_buffer, Updater};
//! use proform::optics::Focus;
//! use proform::record;
//! use proform::value::Value;
//!
//! let root = record! { "count" => 3 };
//! let count = parse_accessor("count");
//!
//! let increment = Updater::apply(|n: Value| Value::from(n.as_i64().unwrap_or(0) + 1));
//! let next = write_buffer(&count, increment, &root).unwrap();
//!
//! assert_eq!(read_buffer(&count, &next).unwrap(), Focus::One(Value::from(4)));
//! ```

use std::fmt;

use crate::accessor::{AccessorProp, parse_accessor};
use crate::error::AccessError;
use crate::optics::{Focus, Optic, Structure};
use crate::validation::{Overlay, ValidationError, error_at};
use crate::value::Value;

/// How a write changes the focus.
pub enum Updater<'a, S = Value> {
    /// Replace every focus with this value.
    Replace(S),
    /// Replace every focus with the function applied to it.
    Apply(Box<dyn Fn(S) -> S + 'a>),
}

impl<'a, S> Updater<'a, S> {
    /// Replaces the focus with `value`.
    pub const fn replace(value: S) -> Self {
        Self::Replace(value)
    }

    /// Applies `function` to the focus.
    pub fn apply<F>(function: F) -> Self
    where
        F: Fn(S) -> S + 'a,
    {
        Self::Apply(Box::new(function))
    }
}

impl From<Value> for Updater<'_, Value> {
    fn from(value: Value) -> Self {
        Self::Replace(value)
    }
}

impl<S: fmt::Debug> fmt::Debug for Updater<'_, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(value) => formatter.debug_tuple("Replace").field(value).finish(),
            Self::Apply(_) => formatter.write_str("Apply(..)"),
        }
    }
}

/// Reads the focus of `optic` in `root`.
///
/// # Errors
///
/// See [`Optic::get`].
pub fn read_buffer<S: Structure>(optic: &Optic, root: &S) -> Result<Focus<S>, AccessError> {
    optic.get(root)
}

/// Returns a new root with the focus of `optic` updated.
///
/// `Replace` sets, `Apply` modifies. `root` is left untouched and every
/// subtree off the edited paths is shared with it.
///
/// # Errors
///
/// See [`Optic::set`] and [`Optic::modify`].
pub fn write_buffer<S: Structure>(optic: &Optic, updater: Updater<'_, S>, root: &S) -> Result<S, AccessError> {
    match updater {
        Updater::Apply(function) => optic.modify(function, root),
        Updater::Replace(value) => optic.set(value, root),
    }
}

/// An accessor resolved once for one control.
///
/// # Examples
///
/// ```
/// use proform::buffer::Binding;
/// use proform::record;
/// use proform::value::Value;
///
/// let name = Binding::new("person.name");
/// let root = record! { "person" => record! { "name" => "" } };
///
/// let next = name.write(Value::from("Alice"), &root).unwrap();
/// assert_eq!(name.read(&next).unwrap(), Value::from("Alice"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Binding {
    optic: Optic,
}

impl Binding {
    /// Resolves `accessor`.
    pub fn new(accessor: impl Into<AccessorProp>) -> Self {
        Self {
            optic: parse_accessor(accessor),
        }
    }

    /// The resolved optic.
    #[must_use]
    pub const fn optic(&self) -> &Optic {
        &self.optic
    }

    /// Reads the value to display: the first focus, or `Null` if there is none.
    ///
    /// # Errors
    ///
    /// See [`Optic::view`].
    pub fn read(&self, root: &Value) -> Result<Value, AccessError> {
        self.optic.view(root)
    }

    /// Writes an edit and returns the new root.
    ///
    /// # Errors
    ///
    /// See [`write_buffer`].
    pub fn write<'a>(&self, updater: impl Into<Updater<'a, Value>>, root: &Value) -> Result<Value, AccessError> {
        write_buffer(&self.optic, updater.into(), root)
    }

    /// Looks up the error placed at this control.
    ///
    /// # Errors
    ///
    /// See [`error_at`].
    pub fn error(&self, overlay: Option<&Overlay>) -> Result<Option<ValidationError>, AccessError> {
        error_at(overlay, &self.optic)
    }
}

impl From<Optic> for Binding {
    fn from(optic: Optic) -> Self {
        Self { optic }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics;
    use crate::validation::{ValidationErrors, build_overlay};
    use crate::{list, record};
    use rstest::rstest;

    #[rstest]
    fn test_replace_shares_siblings() {
        let root = record! { "a" => record! { "b" => 1, "c" => list![2] } };

        let next = write_buffer(&parse_accessor("a.b"), Updater::replace(Value::from(5)), &root).unwrap();

        assert_eq!(next, record! { "a" => record! { "b" => 5, "c" => list![2] } });
        let before = root.get("a").and_then(|a| a.get("c")).unwrap();
        let after = next.get("a").and_then(|a| a.get("c")).unwrap();
        assert!(before.shares_with(after));
        assert_eq!(root.get("a").and_then(|a| a.get("b")), Some(&Value::from(1)));
    }

    #[rstest]
    fn test_apply_on_traversal() {
        let root = record! { "scores" => list![1, 2, 3] };
        let double = Updater::apply(|n: Value| Value::from(n.as_i64().unwrap_or(0) * 2));

        let next = write_buffer(&optics::prop("scores").elems(), double, &root).unwrap();

        assert_eq!(next, record! { "scores" => list![2, 4, 6] });
    }

    #[rstest]
    fn test_absent_prism_returns_root() {
        let root = record! { "items" => list![] };
        let optic = optics::prop("items").at(0usize);

        let next = write_buffer(&optic, Updater::replace(Value::from(1)), &root).unwrap();

        assert!(next.shares_with(&root));
        assert_eq!(read_buffer(&optic, &root).unwrap(), Focus::Maybe(None));
    }

    #[rstest]
    fn test_lens_write_through_null_fails() {
        let root = record! { "a" => Value::Null };

        let error = write_buffer(&parse_accessor("a.b"), Value::from(1).into(), &root).unwrap_err();

        assert!(matches!(error, AccessError::NotAContainer { .. }));
    }

    #[rstest]
    fn test_binding_error() {
        let root = record! { "name" => "" };
        let name = Binding::new("name");
        let overlay = build_overlay(&root, &ValidationErrors::new().with(name.optic(), "required"));

        assert_eq!(name.error(overlay.as_ref()).unwrap().unwrap().to_string(), "required");
        assert_eq!(name.error(None).unwrap(), None);
    }

    #[rstest]
    fn test_updater_debug() {
        assert_eq!(format!("{:?}", Updater::replace(Value::from(1))), "Replace(Int(1))");
        assert_eq!(format!("{:?}", Updater::<Value>::apply(|value| value)), "Apply(..)");
    }
}
