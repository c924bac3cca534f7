//! Dynamic buffer values.
//!
//! [`Value`] is the tree that forms are edited through: scalars, lists and
//! records. Lists and records are persistent [`imbl`] collections, so cloning
//! a value is O(1) and an edit rebuilds only the nodes on the path to the
//! edited position. Everything else is shared with the previous value, which
//! [`Value::shares_with`] makes observable.
//!
//! # Examples
//!
//! ```
//! use proform::{list, record};
//! use proform::value::Value;
//!
//! let person = record! {
//!     "name" => "Alice",
//!     "tags" => list!["admin", "ops"],
//!     "contact" => record! { "address" => "" },
//! };
//!
//! assert_eq!(person.get("name").and_then(Value::as_str), Some("Alice"));
//! assert_eq!(person.get("tags").and_then(|tags| tags.get(1usize)), Some(&Value::from("ops")));
//! ```

mod convert;
mod key;
#[cfg(feature = "serde")]
pub mod json;

use std::fmt;
use std::sync::Arc;

use imbl::{OrdMap, Vector};

pub use convert::{FromValue, IntoValue};
#[doc(hidden)]
pub use convert::{expect_record, field};
pub use key::{Key, Symbol};

/// Persistent record storage.
pub type Record = OrdMap<Key, Value>;

/// Persistent list storage.
pub type List = Vector<Value>;

/// The kind of a node, used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// boolean
    Bool,
    /// integer number
    Int,
    /// floating point number
    Float,
    /// string
    Str,
    /// list
    List,
    /// record
    Record,
    /// validation error held by an overlay
    Error,
}

impl Kind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::List => "list",
            Self::Record => "record",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A node of a form buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(Arc<str>),
    /// Ordered sequence.
    List(List),
    /// Keyed fields, ordered by key.
    Record(Record),
}

impl Value {
    /// Builds a record from key/value pairs.
    ///
    /// Index keys are stored under their decimal name.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(key, value)| (key.into().to_field(), value.into()))
                .collect(),
        )
    }

    /// Builds a list from values.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Str(_) => Kind::Str,
            Self::List(_) => Kind::List,
            Self::Record(_) => Kind::Record,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as `f64`, converting integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list, if this is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the record, if this is one.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Looks up one level down, normalizing `key` against this container.
    ///
    /// Returns `None` for scalars, missing fields and out of range indices.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Self> {
        let key = key.into();
        match self {
            Self::Record(record) => record.get(&key.to_field()),
            Self::List(list) => key.as_index().and_then(|index| list.get(index)),
            _ => None,
        }
    }

    /// Number of children of a container; `0` for scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Record(record) => record.len(),
            _ => 0,
        }
    }

    /// Returns `true` if this value has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tests whether two values are the same node.
    ///
    /// Containers and strings compare by reference; other scalars by value.
    /// After an edit, every subtree off the edited path shares with the
    /// corresponding subtree of the previous value.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(left), Self::List(right)) => left.ptr_eq(right),
            (Self::Record(left), Self::Record(right)) => left.ptr_eq(right),
            (Self::Str(left), Self::Str(right)) => Arc::ptr_eq(left, right),
            (Self::List(_) | Self::Record(_) | Self::Str(_), _) => false,
            (left, right) => left == right,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Str(value) => write!(formatter, "{value:?}"),
            Self::List(list) => {
                formatter.write_str("[")?;
                for (position, element) in list.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Record(record) => {
                formatter.write_str("{")?;
                for (position, (key, element)) in record.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {element}")?;
                }
                formatter.write_str("}")
            }
        }
    }
}

macro_rules! impl_from_integer {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::list(values)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl<V: Into<Self>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::list(iter)
    }
}

/// Builds a [`Value::Record`] from `key => value` pairs.
///
/// Keys go through [`Key::from`], values through [`Value::from`].
///
/// ```
/// use proform::record;
///
/// let point = record! { "x" => 1, "y" => 2 };
/// assert_eq!(point.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Value::Record($crate::imbl::OrdMap::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::value::Value::record([
            $(($crate::value::Key::from($key), $crate::value::Value::from($value))),+
        ])
    };
}

/// Builds a [`Value::List`] from values.
///
/// ```
/// use proform::list;
///
/// assert_eq!(list![1, 2, 3].len(), 3);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::value::Value::List($crate::imbl::Vector::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::value::Value::list([$($crate::value::Value::from($value)),+])
    };
}
