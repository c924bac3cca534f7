//! Accessor normalization.
//!
//! UI controls name the part of the buffer they edit in one of four ways:
//!
//! | Shape | Example | Resolves to |
//! |---|---|---|
//! | key | `Key::from(Symbol::new("id"))`, `0usize` | `optics::prop(key)` |
//! | key path | `["contact", "address.line"]` | `optics::path(keys)` (keys never split) |
//! | dotted string | `"contact.address"` | `optics::dotted(s)` |
//! | optic | `optics::prop("tags").elems()` | the same optic, unchanged |
//!
//! [`parse_accessor`] turns any of them into an [`Optic`]. The four forms of
//! the same logical path behave identically.
//!
//! # Examples
//!
//! ```
//! use proform::accessor::parse_accessor;
//! use proform::optics::{self, Optic};
//! use proform::record;
//!
//! let root = record! { "a" => record! { "b" => 1 } };
//!
//! let from_string = parse_accessor("a.b");
//! let from_path = parse_accessor(["a", "b"]);
//! assert_eq!(from_string.view(&root).unwrap(), from_path.view(&root).unwrap());
//!
//! let optic = optics::path(["a", "b"]);
//! assert!(Optic::ptr_eq(&parse_accessor(&optic), &optic));
//! ```

use std::fmt;

use crate::error::InvalidAccessorError;
use crate::optics::{self, Optic};
use crate::value::{Key, Symbol, Value};

/// Any accepted accessor shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorProp {
    /// A single key.
    Key(Key),
    /// A sequence of keys, used verbatim.
    Path(Vec<Key>),
    /// A `.`-separated path.
    DottedPath(String),
    /// A pre-built optic.
    Optic(Optic),
}

impl AccessorProp {
    /// Resolves this accessor to an optic. See [`parse_accessor`].
    #[must_use]
    pub fn to_optic(&self) -> Optic {
        match self {
            Self::Optic(optic) => optic.clone(),
            Self::Path(keys) => optics::path(keys.iter().cloned()),
            Self::DottedPath(path) => optics::dotted(path),
            Self::Key(key) => optics::prop(key.clone()),
        }
    }

    /// Returns `true` if this accessor is already an optic.
    #[must_use]
    pub const fn is_optic(&self) -> bool {
        matches!(self, Self::Optic(_))
    }

    /// Returns the optic, if this accessor is one.
    #[must_use]
    pub const fn as_optic(&self) -> Option<&Optic> {
        match self {
            Self::Optic(optic) => Some(optic),
            _ => None,
        }
    }
}

/// Resolves any accessor shape to a canonical optic.
///
/// An optic input is returned as-is, preserving its identity. Every call is
/// independent; nothing is cached.
pub fn parse_accessor(input: impl Into<AccessorProp>) -> Optic {
    let accessor = input.into();
    let optic = match accessor {
        AccessorProp::Optic(optic) => optic,
        AccessorProp::Path(keys) => optics::path(keys),
        AccessorProp::DottedPath(ref path) => optics::dotted(path),
        AccessorProp::Key(key) => optics::prop(key),
    };
    tracing::trace!(optic = %optic, "resolved accessor");
    optic
}

/// Resolves an accessor described by a dynamic value.
///
/// Strings are dotted paths, non-negative integers are indices, and lists of
/// strings and non-negative integers are key paths.
///
/// # Errors
///
/// [`InvalidAccessorError`] carrying `value` if it matches none of these shapes.
///
/// # Examples
///
/// ```
/// use proform::accessor::parse_accessor_value;
/// use proform::list;
/// use proform::value::Value;
///
/// assert!(parse_accessor_value(&Value::from("a.b")).is_ok());
/// assert!(parse_accessor_value(&list!["items", 0]).is_ok());
/// assert!(parse_accessor_value(&Value::Bool(true)).is_err());
/// ```
pub fn parse_accessor_value(value: &Value) -> Result<Optic, InvalidAccessorError> {
    AccessorProp::try_from(value).map(parse_accessor)
}

fn key_from_value(value: &Value) -> Option<Key> {
    match value {
        Value::Str(name) => Some(Key::Name(name.clone())),
        Value::Int(index) => usize::try_from(*index).ok().map(Key::Index),
        _ => None,
    }
}

impl TryFrom<&Value> for AccessorProp {
    type Error = InvalidAccessorError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let invalid = || InvalidAccessorError::new(value.clone());
        match value {
            Value::Str(path) => Ok(Self::DottedPath(path.to_string())),
            Value::Int(_) => key_from_value(value).map(Self::Key).ok_or_else(invalid),
            Value::List(keys) => keys
                .iter()
                .map(key_from_value)
                .collect::<Option<Vec<_>>>()
                .map(Self::Path)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for AccessorProp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(formatter, "{key}"),
            Self::Path(keys) => {
                formatter.write_str("[")?;
                for (position, key) in keys.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}")?;
                }
                formatter.write_str("]")
            }
            Self::DottedPath(path) => write!(formatter, "{path:?}"),
            Self::Optic(optic) => write!(formatter, "{optic}"),
        }
    }
}

impl From<&str> for AccessorProp {
    fn from(path: &str) -> Self {
        Self::DottedPath(path.to_owned())
    }
}

impl From<String> for AccessorProp {
    fn from(path: String) -> Self {
        Self::DottedPath(path)
    }
}

impl From<usize> for AccessorProp {
    fn from(index: usize) -> Self {
        Self::Key(Key::Index(index))
    }
}

impl From<Key> for AccessorProp {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<Symbol> for AccessorProp {
    fn from(symbol: Symbol) -> Self {
        Self::Key(Key::Symbol(symbol))
    }
}

impl From<Vec<Key>> for AccessorProp {
    fn from(keys: Vec<Key>) -> Self {
        Self::Path(keys)
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for AccessorProp {
    fn from(keys: [K; N]) -> Self {
        Self::Path(keys.into_iter().map(Into::into).collect())
    }
}

impl From<&[Key]> for AccessorProp {
    fn from(keys: &[Key]) -> Self {
        Self::Path(keys.to_vec())
    }
}

impl From<crate::path::Path> for AccessorProp {
    fn from(path: crate::path::Path) -> Self {
        Self::Path(path.keys().to_vec())
    }
}

impl From<Optic> for AccessorProp {
    fn from(optic: Optic) -> Self {
        Self::Optic(optic)
    }
}

impl From<&Optic> for AccessorProp {
    fn from(optic: &Optic) -> Self {
        Self::Optic(optic.clone())
    }
}

impl From<&Self> for AccessorProp {
    fn from(accessor: &Self) -> Self {
        accessor.clone()
    }
}
