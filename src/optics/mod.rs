//! Optics over form buffers.
//!
//! An [`Optic`] describes how to reach a part of a [`Value`](crate::value::Value)
//! tree and is tagged with how many parts it reaches:
//!
//! - **Lens**: exactly one focus, which must exist;
//! - **Prism**: zero or one focus;
//! - **Traversal**: zero or more foci.
//!
//! # Optics Hierarchy
//!
//! ```text
//! Lens <: Prism <: Traversal
//! compose(a, b).cardinality == max(a.cardinality, b.cardinality)
//! ```
//!
//! # Building optics
//!
//! ```
//! use proform::optics::{self, Cardinality, Optic};
//!
//! let name = optics::prop("name");                    // Lens
//! let city = optics::path(["contact", "city"]);       // Lens
//! let first_tag = optics::prop("tags").at(0usize);    // Prism
//! let tags = optics::prop("tags").elems();            // Traversal
//! let admins = tags.when(|tag| tag.as_str() == Some("admin"));
//!
//! assert_eq!(name.cardinality(), Cardinality::Lens);
//! assert_eq!(city.compose(&first_tag).cardinality(), Cardinality::Prism);
//! assert_eq!(admins.cardinality(), Cardinality::Traversal);
//! assert!(Optic::identity().is_lens());
//! ```
//!
//! # Reading and writing
//!
//! ```
//! use proform::optics::{self, Focus};
//! use proform::{list, record};
//! use proform::value::Value;
//!
//! let root = record! { "count" => 3, "tags" => list!["a", "b"] };
//!
//! let count = optics::prop("count");
//! let bumped = optics::modify(&count, |n: Value| Value::from(n.as_i64().unwrap_or(0) + 1), &root).unwrap();
//! assert_eq!(optics::get(&count, &bumped).unwrap(), Focus::One(Value::from(4)));
//!
//! let tags = optics::prop("tags").elems();
//! let cleared = optics::set(&tags, Value::from(""), &root).unwrap();
//! assert_eq!(cleared.get("tags"), Some(&list!["", ""]));
//!
//! // The input is never modified.
//! assert_eq!(root.get("count"), Some(&Value::from(3)));
//! ```
//!
//! # Lens Laws
//!
//! For a Lens `lens` that resolves against `source`:
//!
//! 1. **GetPut Law**: `lens.set(lens.view(&source)?, &source)? == source`
//! 2. **PutGet Law**: `lens.view(&lens.set(value, &source)?)? == value`
//! 3. **PutPut Law**: `lens.set(v2, &lens.set(v1, &source)?)? == lens.set(v2, &source)?`
//!
//! Every subtree that is not an ancestor of the focus is shared between
//! `source` and the result of `set`.
//!
//! # Prism Laws
//!
//! 1. If the focus is absent, `set` and `modify` return `source` unchanged.
//! 2. If the focus is present, a Prism behaves like a Lens.
//!
//! # Traversal Laws
//!
//! 1. **Modify Identity Law**: `traversal.modify(|x| x, &source)? == source`
//! 2. **Modify Composition Law**:
//!    `traversal.modify(g, &traversal.modify(f, &source)?)? == traversal.modify(|x| g(f(x)), &source)?`
//!
//! # Removal
//!
//! Setting a Prism focus to "absent" is not supported. [`remove`] deletes
//! foci whose parent is a list; records have no removal: use `set` with
//! `Value::Null` to clear a field.

mod cardinality;
mod eval;
mod optic;
mod step;
mod structure;

pub use cardinality::Cardinality;
pub use optic::{Focus, Optic};
pub use step::{Predicate, Step};
pub use structure::{StepFailure, Structure};

use crate::error::AccessError;
use crate::value::Key;

/// A one-step Lens onto `key`.
#[must_use]
pub fn prop(key: impl Into<Key>) -> Optic {
    Optic::identity().prop(key)
}

/// A Lens through `keys` in order; an empty path is the identity.
///
/// Keys are used as given. A key containing `.` addresses a field whose
/// name contains a dot.
#[must_use]
pub fn path<I, K>(keys: I) -> Optic
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    Optic::identity().path(keys)
}

/// A Lens through the `.`-separated segments of `path`.
///
/// There is no escape syntax: `"a.b"` is always the two keys `a` and `b`.
/// The empty string is the identity. Use [`path`] for keys containing dots.
///
/// # Examples
///
/// ```
/// use proform::optics;
///
/// let optic = optics::dotted("items.0.name");
/// assert_eq!(optic.to_string(), "$.items.0.name");
/// assert!(optics::dotted("").steps().is_empty());
/// ```
#[must_use]
pub fn dotted(path: &str) -> Optic {
    if path.is_empty() {
        return Optic::identity();
    }
    Optic::identity().path(path.split('.').map(Key::from))
}

/// Composes `first` then `second`.
#[must_use]
pub fn compose(first: &Optic, second: &Optic) -> Optic {
    first.compose(second)
}

/// Reads the focus of `optic` in `root`, shaped by the optic's cardinality.
///
/// # Errors
///
/// See [`Optic::get`].
pub fn get<S: Structure>(optic: &Optic, root: &S) -> Result<Focus<S>, AccessError> {
    optic.get(root)
}

/// Returns a new root with every focus replaced by `value`.
///
/// # Errors
///
/// See [`Optic::set`].
pub fn set<S: Structure>(optic: &Optic, value: S, root: &S) -> Result<S, AccessError> {
    optic.set(value, root)
}

/// Returns a new root with `function` applied to every focus.
///
/// # Errors
///
/// See [`Optic::modify`].
pub fn modify<S, F>(optic: &Optic, function: F, root: &S) -> Result<S, AccessError>
where
    S: Structure,
    F: Fn(S) -> S,
{
    optic.modify(function, root)
}

/// Returns a new root with every focus removed from its parent list.
///
/// # Errors
///
/// See [`Optic::remove`].
pub fn remove<S: Structure>(optic: &Optic, root: &S) -> Result<S, AccessError> {
    optic.remove(root)
}
