//! The tree capabilities optics are evaluated against.
//!
//! [`Structure`] is implemented for [`Value`] (form buffers) and for
//! [`Overlay`](crate::validation::Overlay) (validation results), so one optic
//! reads both.

use super::Predicate;
use crate::error::AccessError;
use crate::path::Path;
use crate::value::{Key, Kind, Value};

/// Why a single step failed, without location information.
///
/// The evaluator turns this into an [`AccessError`] carrying the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepFailure {
    /// The node is not a container.
    NotAContainer(Kind),
    /// A record has no such field.
    Missing,
    /// A list index is past the end.
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// List length.
        len: usize,
    },
    /// The key cannot address this container kind.
    KeyMismatch(Kind),
}

impl StepFailure {
    pub(crate) fn at(self, path: &Path, key: &Key) -> AccessError {
        let path = path.clone();
        let key = key.clone();
        match self {
            Self::NotAContainer(found) => AccessError::NotAContainer { path, key, found },
            Self::Missing => AccessError::MissingKey { path, key },
            Self::OutOfBounds { index, len } => AccessError::IndexOutOfBounds { path, index, len },
            Self::KeyMismatch(found) => AccessError::KeyMismatch { path, key, found },
        }
    }
}

/// A persistent tree that optics can read and rebuild.
///
/// Implementations never mutate `self`; every "write" returns a new node that
/// shares unchanged children with the old one.
pub trait Structure: Clone {
    /// Kind of this node.
    fn kind(&self) -> Kind;

    /// Returns the child at `key`.
    ///
    /// # Errors
    ///
    /// A [`StepFailure`] describing why the key does not resolve.
    fn child(&self, key: &Key) -> Result<Self, StepFailure>;

    /// Returns a copy of this node with the child at `key` replaced.
    ///
    /// Records insert missing keys; lists require an in-range index.
    ///
    /// # Errors
    ///
    /// A [`StepFailure`] if the node cannot hold a child at `key`.
    fn with_child(&self, key: &Key, child: Self) -> Result<Self, StepFailure>;

    /// Returns every child with its key, in structural order.
    ///
    /// Scalars have no children.
    fn children(&self) -> Vec<(Key, Self)>;

    /// Returns a copy of this list without the elements at `indices`.
    ///
    /// # Errors
    ///
    /// [`StepFailure::NotAContainer`] if the node is not a list.
    fn remove_elements(&self, indices: &[usize]) -> Result<Self, StepFailure>;

    /// Returns `true` if this node is `null`.
    fn is_null(&self) -> bool;

    /// Evaluates a predicate against this node.
    fn matches(&self, predicate: &Predicate) -> bool;

    /// Tests whether `other` is this same node, so a rebuild can be skipped.
    fn shares_with(&self, other: &Self) -> bool;
}

fn list_index(key: &Key, len: usize) -> Result<usize, StepFailure> {
    let index = key.as_index().ok_or(StepFailure::KeyMismatch(Kind::List))?;
    if index < len {
        Ok(index)
    } else {
        Err(StepFailure::OutOfBounds { index, len })
    }
}

impl Structure for Value {
    fn kind(&self) -> Kind {
        Self::kind(self)
    }

    fn child(&self, key: &Key) -> Result<Self, StepFailure> {
        match self {
            Self::Record(record) => record
                .get(&key.to_field())
                .cloned()
                .ok_or(StepFailure::Missing),
            Self::List(list) => {
                let index = list_index(key, list.len())?;
                list.get(index)
                    .cloned()
                    .ok_or(StepFailure::OutOfBounds { index, len: list.len() })
            }
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }

    fn with_child(&self, key: &Key, child: Self) -> Result<Self, StepFailure> {
        match self {
            Self::Record(record) => Ok(Self::Record(record.update(key.to_field(), child))),
            Self::List(list) => {
                let index = list_index(key, list.len())?;
                Ok(Self::List(list.update(index, child)))
            }
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }

    fn children(&self) -> Vec<(Key, Self)> {
        match self {
            Self::Record(record) => record
                .iter()
                .map(|(key, child)| (key.clone(), child.clone()))
                .collect(),
            Self::List(list) => list
                .iter()
                .enumerate()
                .map(|(index, child)| (Key::Index(index), child.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn remove_elements(&self, indices: &[usize]) -> Result<Self, StepFailure> {
        match self {
            Self::List(list) => Ok(Self::List(
                list.iter()
                    .enumerate()
                    .filter(|(index, _)| !indices.contains(index))
                    .map(|(_, element)| element.clone())
                    .collect(),
            )),
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }

    fn is_null(&self) -> bool {
        Self::is_null(self)
    }

    fn matches(&self, predicate: &Predicate) -> bool {
        predicate.test(self)
    }

    fn shares_with(&self, other: &Self) -> bool {
        Self::shares_with(self, other)
    }
}
