//! Concrete key paths used to report locations.
//!
//! A [`Path`] is the sequence of [`Key`]s that leads from the root of a buffer
//! to one node. Errors carry the path at which they occurred, and
//! [`Overlay::errors`](crate::validation::Overlay::errors) reports error
//! locations as paths.

use std::fmt;

use smallvec::SmallVec;

use crate::value::Key;

/// A sequence of keys from the root to a node.
///
/// # Examples
///
/// ```
/// use proform::path::Path;
///
/// let path = Path::root().key("users").index(0).key("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "$.users[0].name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(SmallVec<[Key; 8]>);

impl Path {
    /// Creates the empty (root) path.
    #[inline]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Appends a name key (builder style).
    #[inline]
    #[must_use]
    pub fn key(mut self, name: &str) -> Self {
        self.0.push(Key::from(name));
        self
    }

    /// Appends an index key (builder style).
    #[inline]
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Key::Index(index));
        self
    }

    /// Pushes a key at the end.
    #[inline]
    pub fn push(&mut self, key: Key) {
        self.0.push(key);
    }

    /// Removes the last key.
    #[inline]
    pub fn pop(&mut self) -> Option<Key> {
        self.0.pop()
    }

    /// Returns the keys in order.
    #[inline]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Returns `true` for the root path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a new path with `prefix` in front of this one.
    #[must_use]
    pub fn prefixed(&self, prefix: Key) -> Self {
        let mut keys = SmallVec::with_capacity(self.0.len() + 1);
        keys.push(prefix);
        keys.extend(self.0.iter().cloned());
        Self(keys)
    }

    /// Iterates over the keys.
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("$")?;
        for key in &self.0 {
            match key {
                Key::Name(name) => write!(formatter, ".{name}")?,
                Key::Index(index) => write!(formatter, "[{index}]")?,
                Key::Symbol(symbol) => write!(formatter, "[{symbol}]")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
