//! Error types for accessor resolution and buffer access.
//!
//! - [`AccessError`]: an optic step could not be applied to the buffer.
//! - [`InvalidAccessorError`]: a dynamic value did not describe any accessor.
//! - [`FromValueError`]: a [`Value`] did not have the shape a typed buffer expects.
//!
//! [`ProformError`] aggregates all three for callers that handle them together.

use thiserror::Error;

use crate::path::Path;
use crate::value::{Key, Kind, Value};

/// Result type alias for operations that may fail with any kernel error.
pub type ProformResult<T> = Result<T, ProformError>;

/// An optic step could not be traversed.
///
/// Under a Lens every mismatch between the accessor and the buffer shape is
/// reported; under a Prism or Traversal a mismatch simply means "no focus".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A key was applied to a scalar, `null` or an error node.
    #[error("cannot access `{key}` on {found} at {path}")]
    NotAContainer {
        /// Location of the node the key was applied to.
        path: Path,
        /// The key that was applied.
        key: Key,
        /// What was found instead of a container.
        found: Kind,
    },

    /// A record has no field for the key.
    #[error("missing key `{key}` at {path}")]
    MissingKey {
        /// Location of the record.
        path: Path,
        /// The missing key.
        key: Key,
    },

    /// A list index is past the end.
    #[error("index {index} out of bounds (len: {len}) at {path}")]
    IndexOutOfBounds {
        /// Location of the list.
        path: Path,
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },

    /// The key kind cannot address this container (e.g. a field name on a list).
    #[error("key `{key}` cannot address a {found} at {path}")]
    KeyMismatch {
        /// Location of the container.
        path: Path,
        /// The key that was applied.
        key: Key,
        /// The container kind.
        found: Kind,
    },

    /// Removal was requested for a focus whose parent is not a list.
    #[error("removal requires a list at {path}, found {found}")]
    RemoveUnsupported {
        /// Location of the parent.
        path: Path,
        /// What the parent is.
        found: Kind,
    },
}

impl AccessError {
    /// Returns the location at which the error occurred.
    #[must_use]
    pub const fn path(&self) -> &Path {
        match self {
            Self::NotAContainer { path, .. }
            | Self::MissingKey { path, .. }
            | Self::IndexOutOfBounds { path, .. }
            | Self::KeyMismatch { path, .. }
            | Self::RemoveUnsupported { path, .. } => path,
        }
    }
}

/// A dynamic value does not describe an accessor.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("invalid accessor {value}")]
pub struct InvalidAccessorError {
    /// The offending value.
    pub value: Value,
}

impl InvalidAccessorError {
    /// Creates an error carrying the offending value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self { value }
    }
}

/// A value could not be converted into a typed buffer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("type mismatch at {path}: expected {expected}, found {found}")]
pub struct FromValueError {
    /// Location of the mismatching node, relative to the converted value.
    pub path: Path,
    /// The expected shape.
    pub expected: &'static str,
    /// What was found.
    pub found: Kind,
}

impl FromValueError {
    /// Creates a mismatch error at the root.
    #[must_use]
    pub fn type_mismatch(expected: &'static str, found: Kind) -> Self {
        Self {
            path: Path::root(),
            expected,
            found,
        }
    }

    /// Puts `key` in front of the error path.
    ///
    /// Used while converting nested structures so the final error names the
    /// full location.
    #[must_use]
    pub fn with_prefix(self, key: Key) -> Self {
        Self {
            path: self.path.prefixed(key),
            ..self
        }
    }
}

/// Any kernel error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProformError {
    /// See [`AccessError`].
    #[error(transparent)]
    Access(#[from] AccessError),

    /// See [`InvalidAccessorError`].
    #[error(transparent)]
    InvalidAccessor(#[from] InvalidAccessorError),

    /// See [`FromValueError`].
    #[error(transparent)]
    FromValue(#[from] FromValueError),
}
