//! Validation results and the overlay that places them on a buffer.
//!
//! A validator reports errors as [`ValidationErrors`]: an ordered mapping from
//! accessors to payloads. [`build_overlay`] places each payload at the
//! location its accessor names, producing an [`Overlay`] shaped like the
//! buffer. Display sites then look their own error up with [`error_at`],
//! using the same accessor they read the buffer with.
//!
//! # Examples
//!
//! ```
//! use proform::record;
//! use proform::validation::{build_overlay, error_at, ValidationErrors};
//!
//! let root = record! { "name" => "", "contact" => record! { "address" => "" } };
//! let errors = ValidationErrors::new()
//!     .with("name", "required")
//!     .with("contact.address", "required");
//!
//! let overlay = build_overlay(&root, &errors);
//!
//! let name_error = error_at(overlay.as_ref(), "name").unwrap().unwrap();
//! assert_eq!(name_error.to_string(), "required");
//! assert!(error_at(overlay.as_ref(), "contact").unwrap().is_none());
//! assert!(error_at(overlay.as_ref(), "contact.address").unwrap().is_some());
//! ```

mod overlay;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::accessor::AccessorProp;
use crate::value::Value;

pub use overlay::{Overlay, build_overlay, error_at, validate_overlay};

// =============================================================================
// Fragment
// =============================================================================

/// Opaque pre-rendered UI content attached to an error.
///
/// The kernel never inspects a fragment; the view layer downcasts it back to
/// its own type. Two fragments are equal only if they are the same instance.
#[derive(Clone)]
pub struct Fragment(Arc<dyn Any + Send + Sync>);

impl Fragment {
    /// Wraps view content.
    pub fn new<T: Any + Send + Sync>(content: T) -> Self {
        Self(Arc::new(content))
    }

    /// Returns the content if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Fragment(..)")
    }
}

// =============================================================================
// ValidationError
// =============================================================================

/// The canonical wrapper stored in an overlay.
#[derive(Clone, Debug, Default, PartialEq, Error)]
#[error("{}", .message.as_deref().unwrap_or("invalid value"))]
pub struct ValidationError {
    /// Text to show.
    pub message: Option<String>,
    /// Content to show instead of the text.
    pub fragment: Option<Fragment>,
}

/// What a display site should render for an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rendered<'a> {
    /// Pre-rendered content.
    Fragment(&'a Fragment),
    /// Plain text.
    Text(&'a str),
    /// Nothing beyond the error state itself.
    Empty,
}

impl ValidationError {
    /// An error with a text message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            fragment: None,
        }
    }

    /// An error carrying pre-rendered content.
    #[must_use]
    pub const fn from_fragment(fragment: Fragment) -> Self {
        Self {
            message: None,
            fragment: Some(fragment),
        }
    }

    /// The fragment if present, else the message.
    #[must_use]
    pub fn render(&self) -> Rendered<'_> {
        match (&self.fragment, &self.message) {
            (Some(fragment), _) => Rendered::Fragment(fragment),
            (None, Some(message)) => Rendered::Text(message),
            (None, None) => Rendered::Empty,
        }
    }
}

// =============================================================================
// ErrorPayload
// =============================================================================

/// An error as reported by a validator.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorPayload {
    /// Plain text.
    Message(String),
    /// Pre-rendered content.
    Fragment(Fragment),
    /// An already wrapped error, stored unchanged.
    Error(ValidationError),
}

impl ErrorPayload {
    /// Wraps the payload into the form placed in an overlay.
    #[must_use]
    pub fn into_validation_error(self) -> ValidationError {
        match self {
            Self::Message(message) => ValidationError::new(message),
            Self::Fragment(fragment) => ValidationError::from_fragment(fragment),
            Self::Error(error) => error,
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<Fragment> for ErrorPayload {
    fn from(fragment: Fragment) -> Self {
        Self::Fragment(fragment)
    }
}

impl From<ValidationError> for ErrorPayload {
    fn from(error: ValidationError) -> Self {
        Self::Error(error)
    }
}

// =============================================================================
// ValidationErrors
// =============================================================================

/// Errors keyed by accessor, in insertion order.
///
/// Inserting an accessor that is already present replaces its payload in
/// place. Optic accessors compare by identity, so inserting a rebuilt but
/// equivalent optic adds a second entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(AccessorProp, ErrorPayload)>,
}

impl ValidationErrors {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Records an error, replacing any payload stored for an equal accessor.
    ///
    /// Returns the replaced payload.
    pub fn insert(
        &mut self,
        accessor: impl Into<AccessorProp>,
        payload: impl Into<ErrorPayload>,
    ) -> Option<ErrorPayload> {
        let accessor = accessor.into();
        let payload = payload.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == accessor) {
            Some((_, slot)) => Some(std::mem::replace(slot, payload)),
            None => {
                self.entries.push((accessor, payload));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, accessor: impl Into<AccessorProp>, payload: impl Into<ErrorPayload>) -> Self {
        self.insert(accessor, payload);
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no errors were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccessorProp, &ErrorPayload)> {
        self.entries.iter().map(|(accessor, payload)| (accessor, payload))
    }

    /// Returns the payload stored for an equal accessor.
    pub fn get(&self, accessor: impl Into<AccessorProp>) -> Option<&ErrorPayload> {
        let accessor = accessor.into();
        self.entries
            .iter()
            .find(|(existing, _)| *existing == accessor)
            .map(|(_, payload)| payload)
    }
}

impl<A, P> FromIterator<(A, P)> for ValidationErrors
where
    A: Into<AccessorProp>,
    P: Into<ErrorPayload>,
{
    fn from_iter<I: IntoIterator<Item = (A, P)>>(iter: I) -> Self {
        let mut errors = Self::new();
        errors.extend(iter);
        errors
    }
}

impl<A, P> Extend<(A, P)> for ValidationErrors
where
    A: Into<AccessorProp>,
    P: Into<ErrorPayload>,
{
    fn extend<I: IntoIterator<Item = (A, P)>>(&mut self, iter: I) {
        for (accessor, payload) in iter {
            self.insert(accessor, payload);
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (AccessorProp, ErrorPayload);
    type IntoIter = std::vec::IntoIter<(AccessorProp, ErrorPayload)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Validate
// =============================================================================

/// A validator over a whole buffer.
///
/// Implemented for every `Fn(&Value) -> ValidationErrors`.
pub trait Validate {
    /// Reports every error found in `root`.
    fn validate(&self, root: &Value) -> ValidationErrors;
}

impl<F> Validate for F
where
    F: Fn(&Value) -> ValidationErrors,
{
    fn validate(&self, root: &Value) -> ValidationErrors {
        self(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics;
    use rstest::rstest;

    #[rstest]
    fn test_insert_replaces_in_place() {
        let mut errors = ValidationErrors::new().with("a", "first").with("b", "second");

        let replaced = errors.insert("a", "third");

        assert_eq!(replaced, Some(ErrorPayload::from("first")));
        let accessors: Vec<_> = errors.iter().map(|(accessor, _)| accessor.to_string()).collect();
        assert_eq!(accessors, vec!["\"a\"", "\"b\""]);
        assert_eq!(errors.get("a"), Some(&ErrorPayload::from("third")));
    }

    #[rstest]
    fn test_optic_accessors_compare_by_identity() {
        let optic = optics::prop("a");
        let errors = ValidationErrors::new()
            .with(&optic, "one")
            .with(&optic, "two")
            .with(optics::prop("a"), "three");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(&optic), Some(&ErrorPayload::from("two")));
    }

    #[rstest]
    fn test_render_prefers_fragment() {
        let fragment = Fragment::new(42_u32);
        let error = ValidationError {
            message: Some("text".into()),
            fragment: Some(fragment.clone()),
        };

        assert_eq!(error.render(), Rendered::Fragment(&fragment));
        assert_eq!(ValidationError::new("text").render(), Rendered::Text("text"));
        assert_eq!(ValidationError::default().render(), Rendered::Empty);
        assert_eq!(fragment.downcast_ref::<u32>(), Some(&42));
    }

    #[rstest]
    fn test_display() {
        assert_eq!(ValidationError::new("required").to_string(), "required");
        assert_eq!(ValidationError::default().to_string(), "invalid value");
    }

    #[rstest]
    fn test_payload_wrapping() {
        let wrapped = ValidationError::new("kept");
        assert_eq!(
            ErrorPayload::from(wrapped.clone()).into_validation_error(),
            wrapped
        );
        assert_eq!(
            ErrorPayload::from("text").into_validation_error(),
            ValidationError::new("text")
        );
    }

    #[rstest]
    fn test_closure_validator() {
        let validator = |root: &Value| {
            if root.get("name").and_then(Value::as_str) == Some("") {
                ValidationErrors::new().with("name", "required")
            } else {
                ValidationErrors::new()
            }
        };

        let root = crate::record! { "name" => "" };
        assert_eq!(validator.validate(&root).len(), 1);
    }
}
