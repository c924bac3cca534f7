//! The buffer-shaped error overlay.

use imbl::{OrdMap, Vector};

use super::{ErrorPayload, Validate, ValidationError, ValidationErrors};
use crate::accessor::{AccessorProp, parse_accessor};
use crate::error::AccessError;
use crate::optics::{Predicate, StepFailure, Structure};
use crate::path::Path;
use crate::value::{Key, Kind, Value};

/// A buffer with validation errors placed at some of its positions.
///
/// Built by [`build_overlay`] and read with the same optics as the buffer.
/// Containers are expanded one level at a time, only along the paths where
/// errors were placed; every other subtree is the original buffer node.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// An untouched buffer subtree.
    Value(Value),
    /// An error in place of the original node.
    Error(ValidationError),
    /// A record with at least one error below it.
    Record(OrdMap<Key, Overlay>),
    /// A list with at least one error below it.
    List(Vector<Overlay>),
}

impl Overlay {
    /// Returns the error if this node is one.
    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Reconstructs the buffer value, or `None` if this subtree holds an error.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::Error(_) => None,
            Self::Record(fields) => fields
                .iter()
                .map(|(key, field)| field.to_value().map(|value| (key.clone(), value)))
                .collect::<Option<OrdMap<_, _>>>()
                .map(Value::Record),
            Self::List(elements) => elements
                .iter()
                .map(Self::to_value)
                .collect::<Option<Vector<_>>>()
                .map(Value::List),
        }
    }

    /// Lists every error with its location, in structural order.
    #[must_use]
    pub fn errors(&self) -> Vec<(Path, ValidationError)> {
        let mut out = Vec::new();
        self.collect_errors(&mut Path::root(), &mut out);
        out
    }

    fn collect_errors(&self, path: &mut Path, out: &mut Vec<(Path, ValidationError)>) {
        match self {
            Self::Value(_) => {}
            Self::Error(error) => out.push((path.clone(), error.clone())),
            Self::Record(fields) => {
                for (key, field) in fields {
                    path.push(key.clone());
                    field.collect_errors(path, out);
                    path.pop();
                }
            }
            Self::List(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    path.push(Key::Index(index));
                    element.collect_errors(path, out);
                    path.pop();
                }
            }
        }
    }

    /// Expands an untouched container by one level.
    fn expanded(&self) -> Result<Self, StepFailure> {
        match self {
            Self::Value(Value::Record(record)) => Ok(Self::Record(
                record
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::Value(value.clone())))
                    .collect(),
            )),
            Self::Value(Value::List(list)) => Ok(Self::List(list.iter().cloned().map(Self::Value).collect())),
            Self::Record(_) | Self::List(_) => Ok(self.clone()),
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }
}

fn list_index(key: &Key, len: usize) -> Result<usize, StepFailure> {
    let index = key.as_index().ok_or(StepFailure::KeyMismatch(Kind::List))?;
    if index < len {
        Ok(index)
    } else {
        Err(StepFailure::OutOfBounds { index, len })
    }
}

impl Structure for Overlay {
    fn kind(&self) -> Kind {
        match self {
            Self::Value(value) => value.kind(),
            Self::Error(_) => Kind::Error,
            Self::Record(_) => Kind::Record,
            Self::List(_) => Kind::List,
        }
    }

    fn child(&self, key: &Key) -> Result<Self, StepFailure> {
        match self {
            Self::Value(value) => value.child(key).map(Self::Value),
            Self::Error(_) => Err(StepFailure::NotAContainer(Kind::Error)),
            Self::Record(fields) => fields.get(&key.to_field()).cloned().ok_or(StepFailure::Missing),
            Self::List(elements) => {
                let index = list_index(key, elements.len())?;
                elements
                    .get(index)
                    .cloned()
                    .ok_or(StepFailure::OutOfBounds { index, len: elements.len() })
            }
        }
    }

    fn with_child(&self, key: &Key, child: Self) -> Result<Self, StepFailure> {
        match self.expanded()? {
            Self::Record(fields) => Ok(Self::Record(fields.update(key.to_field(), child))),
            Self::List(elements) => {
                let index = list_index(key, elements.len())?;
                Ok(Self::List(elements.update(index, child)))
            }
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }

    fn children(&self) -> Vec<(Key, Self)> {
        match self {
            Self::Value(value) => value
                .children()
                .into_iter()
                .map(|(key, child)| (key, Self::Value(child)))
                .collect(),
            Self::Error(_) => Vec::new(),
            Self::Record(fields) => fields
                .iter()
                .map(|(key, field)| (key.clone(), field.clone()))
                .collect(),
            Self::List(elements) => elements
                .iter()
                .enumerate()
                .map(|(index, element)| (Key::Index(index), element.clone()))
                .collect(),
        }
    }

    fn remove_elements(&self, indices: &[usize]) -> Result<Self, StepFailure> {
        match self {
            Self::Value(value) => value.remove_elements(indices).map(Self::Value),
            Self::List(elements) => Ok(Self::List(
                elements
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| !indices.contains(index))
                    .map(|(_, element)| element.clone())
                    .collect(),
            )),
            other => Err(StepFailure::NotAContainer(other.kind())),
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    fn matches(&self, predicate: &Predicate) -> bool {
        self.to_value().is_some_and(|value| predicate.test(&value))
    }

    fn shares_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(left), Self::Value(right)) => left.shares_with(right),
            (Self::Record(left), Self::Record(right)) => left.ptr_eq(right),
            (Self::List(left), Self::List(right)) => left.ptr_eq(right),
            (Self::Error(left), Self::Error(right)) => left == right,
            _ => false,
        }
    }
}

/// Places every reported error on a copy of `root`.
///
/// Entries are applied in insertion order, each with the Lens-or-Prism
/// semantics of its accessor. An entry that cannot be applied (for example a
/// path through an error placed by an earlier entry, or an index past the end
/// of a list) is skipped with a warning. Returns `None` when there are no
/// errors at all, and `Some` otherwise, even if every entry was skipped.
///
/// # Examples
///
/// ```
/// use proform::record;
/// use proform::validation::{build_overlay, ValidationErrors};
///
/// let root = record! { "name" => "" };
/// assert!(build_overlay(&root, &ValidationErrors::new()).is_none());
///
/// let overlay = build_overlay(&root, &ValidationErrors::new().with("name", "required")).unwrap();
/// assert_eq!(overlay.errors().len(), 1);
/// ```
#[must_use]
pub fn build_overlay(root: &Value, errors: &ValidationErrors) -> Option<Overlay> {
    if errors.is_empty() {
        return None;
    }

    let mut overlay = Overlay::Value(root.clone());
    let mut skipped = 0_usize;
    for (accessor, payload) in errors.iter() {
        let optic = parse_accessor(accessor);
        let placed = Overlay::Error(ErrorPayload::into_validation_error(payload.clone()));
        match optic.set(placed, &overlay) {
            Ok(next) => overlay = next,
            Err(error) => {
                skipped += 1;
                tracing::warn!(accessor = %accessor, error = %error, "skipping validation error that does not apply to the buffer");
            }
        }
    }

    tracing::debug!(entries = errors.len(), skipped, "validation overlay built");
    Some(overlay)
}

/// Runs `validator` on `root` and builds the overlay of its result.
#[must_use]
pub fn validate_overlay<V: Validate + ?Sized>(root: &Value, validator: &V) -> Option<Overlay> {
    build_overlay(root, &validator.validate(root))
}

/// Looks up the error placed at `accessor`.
///
/// Returns `Ok(None)` when there is no overlay, when the focus is not an
/// error, or when the path is blocked by an error at one of its ancestors.
/// For a Traversal the first error focus is returned.
///
/// # Errors
///
/// The [`AccessError`] a Lens accessor would report against the buffer
/// itself, for example when a key is missing.
pub fn error_at(
    overlay: Option<&Overlay>,
    accessor: impl Into<AccessorProp>,
) -> Result<Option<ValidationError>, AccessError> {
    let Some(overlay) = overlay else {
        return Ok(None);
    };
    match parse_accessor(accessor).collect(overlay) {
        Ok(foci) => Ok(foci.iter().find_map(Overlay::error).cloned()),
        Err(AccessError::NotAContainer { found: Kind::Error, .. }) => Ok(None),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics;
    use crate::{list, record};
    use rstest::rstest;

    fn form() -> Value {
        record! {
            "name" => "",
            "contact" => record! { "address" => "", "city" => "Paris" },
            "tags" => list!["ok", ""],
        }
    }

    #[rstest]
    fn test_untouched_subtrees_are_shared() {
        let root = form();
        let overlay = build_overlay(&root, &ValidationErrors::new().with("name", "required")).unwrap();

        let Overlay::Record(fields) = &overlay else {
            panic!("expected an expanded record, got {overlay:?}");
        };
        let Some(Overlay::Value(contact)) = fields.get(&Key::from("contact")) else {
            panic!("contact should stay untouched");
        };
        assert!(contact.shares_with(root.get("contact").unwrap()));
    }

    #[rstest]
    fn test_error_below_an_error_is_skipped() {
        let errors = ValidationErrors::new()
            .with("contact", "incomplete")
            .with("contact.address", "required");

        let overlay = build_overlay(&form(), &errors).unwrap();

        assert_eq!(
            overlay.errors(),
            vec![(Path::root().key("contact"), ValidationError::new("incomplete"))]
        );
        assert_eq!(error_at(Some(&overlay), "contact.address").unwrap(), None);
    }

    #[rstest]
    fn test_all_entries_skipped_still_builds() {
        let errors = ValidationErrors::new().with("tags.7", "missing");

        let overlay = build_overlay(&form(), &errors).unwrap();

        assert!(overlay.errors().is_empty());
        assert_eq!(overlay.to_value(), Some(form()));
    }

    #[rstest]
    fn test_prism_accessor_on_absent_focus() {
        let overlay = build_overlay(
            &form(),
            &ValidationErrors::new().with(optics::prop("tags").at(9usize), "absent"),
        )
        .unwrap();

        assert!(overlay.errors().is_empty());
    }

    #[rstest]
    fn test_traversal_accessor_marks_every_focus() {
        let empty = optics::prop("tags").elems().when(|tag| tag.as_str() == Some(""));
        let overlay = build_overlay(&form(), &ValidationErrors::new().with(&empty, "blank")).unwrap();

        assert_eq!(
            overlay.errors(),
            vec![(Path::root().key("tags").index(1), ValidationError::new("blank"))]
        );
        assert_eq!(
            error_at(Some(&overlay), optics::prop("tags").elems()).unwrap(),
            Some(ValidationError::new("blank"))
        );
    }

    #[rstest]
    fn test_error_at_without_overlay() {
        assert_eq!(error_at(None, "name").unwrap(), None);
    }

    #[rstest]
    fn test_error_at_reports_missing_key() {
        let overlay = build_overlay(&form(), &ValidationErrors::new().with("name", "required")).unwrap();

        assert!(matches!(
            error_at(Some(&overlay), "nickname"),
            Err(AccessError::MissingKey { .. })
        ));
    }

    #[rstest]
    fn test_predicates_see_original_values() {
        let overlay = Overlay::Value(form());
        let city = optics::prop("contact").when(|contact| contact.get("city").is_some());

        assert_eq!(city.collect(&overlay).unwrap().len(), 1);
    }
}
