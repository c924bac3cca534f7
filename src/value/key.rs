//! Keys addressing one level of a [`Value`](super::Value).
//!
//! A [`Key`] is either a field name, a list index, or a [`Symbol`]. Keys are
//! normalized against the container they are applied to:
//!
//! - on a record, `Index(n)` addresses the field named `"n"`;
//! - on a list, a `Name` made of decimal digits addresses that element.
//!
//! # Examples
//!
//! ```
//! use proform::value::{Key, Symbol};
//!
//! assert_eq!(Key::from("name").to_string(), "name");
//! assert_eq!(Key::from(3usize).as_index(), Some(3));
//! assert_eq!(Key::from("7").as_index(), Some(7));
//!
//! let tag = Symbol::new("tag");
//! assert_ne!(Key::from(tag.clone()), Key::from(Symbol::new("tag")));
//! assert_eq!(Key::from(tag.clone()), Key::from(tag));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// A unique key token.
///
/// Every call to [`Symbol::new`] yields a key distinct from all others, even
/// when the descriptions are equal. Clones compare equal to the original.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    /// Creates a fresh symbol with the given description.
    #[must_use]
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.into(),
        }
    }

    /// Returns the human readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "@{}", self.description)
    }
}

/// A single accessor step: a field name, a list index, or a symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Named field of a record.
    Name(Arc<str>),
    /// Position in a list.
    Index(usize),
    /// Symbol-keyed record field.
    Symbol(Symbol),
}

impl Key {
    /// Creates a name key.
    #[inline]
    pub fn name(name: impl Into<Arc<str>>) -> Self {
        Self::Name(name.into())
    }

    /// Creates an index key.
    #[inline]
    pub const fn index(index: usize) -> Self {
        Self::Index(index)
    }

    /// Returns the list index this key addresses, if any.
    ///
    /// Names consisting only of ASCII digits count as indices so that dotted
    /// paths such as `"items.0"` can address list elements.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(name) if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) => {
                name.parse().ok()
            }
            Self::Name(_) | Self::Symbol(_) => None,
        }
    }

    /// Returns the key under which this key is stored in a record.
    #[must_use]
    pub fn to_field(&self) -> Self {
        match self {
            Self::Index(index) => Self::Name(index.to_string().into()),
            other => other.clone(),
        }
    }

    /// Returns the field name, if this is a name key.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) | Self::Symbol(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => formatter.write_str(name),
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Symbol(symbol) => write!(formatter, "{symbol}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name.into())
    }
}

impl From<Arc<str>> for Key {
    fn from(name: Arc<str>) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}
