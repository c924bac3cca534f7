//! The canonical optic value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::eval::{self, Mode, Update};
use super::{Cardinality, Predicate, Step, Structure};
use crate::error::AccessError;
use crate::path::Path;
use crate::value::{Key, Value};

struct Inner {
    cardinality: Cardinality,
    steps: Vec<Step>,
}

/// A composable accessor of Lens, Prism or Traversal cardinality.
///
/// Optics are immutable and cheap to clone. Builder methods return new optics
/// and leave `self` untouched.
///
/// Equality and hashing are by **identity**: a clone of an optic equals the
/// original, while an optic built again from the same steps does not. This
/// makes optics usable as map keys by reference; reuse the accessor value
/// rather than rebuilding an equivalent one when identity matters.
///
/// # Examples
///
/// ```
/// use proform::optics::{self, Cardinality};
/// use proform::record;
/// use proform::value::Value;
///
/// let root = record! { "a" => record! { "b" => 1, "c" => 2 } };
/// let optic = optics::path(["a", "b"]);
///
/// assert_eq!(optic.cardinality(), Cardinality::Lens);
/// assert_eq!(optic.view(&root).unwrap(), Value::from(1));
///
/// let updated = optic.set(5.into(), &root).unwrap();
/// assert_eq!(updated, record! { "a" => record! { "b" => 5, "c" => 2 } });
///
/// let same = optic.clone();
/// assert_eq!(same, optic);
/// assert_ne!(optics::path(["a", "b"]), optic);
/// ```
#[derive(Clone)]
pub struct Optic {
    inner: Arc<Inner>,
}

impl Optic {
    /// The identity Lens: focuses on the root itself.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_steps(Vec::new())
    }

    /// Builds an optic from a step sequence.
    ///
    /// The cardinality is the widest of the steps' cardinalities.
    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Self {
        let cardinality = steps
            .iter()
            .map(Step::cardinality)
            .fold(Cardinality::Lens, Cardinality::widen);
        Self {
            inner: Arc::new(Inner { cardinality, steps }),
        }
    }

    fn then(&self, step: Step) -> Self {
        let mut steps = self.inner.steps.clone();
        steps.push(step);
        Self::from_steps(steps)
    }

    /// Appends a Lens step onto the child at `key`.
    #[must_use]
    pub fn prop(&self, key: impl Into<Key>) -> Self {
        self.then(Step::Prop(key.into()))
    }

    /// Appends one Lens step per key. Keys are never split.
    #[must_use]
    pub fn path<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let mut steps = self.inner.steps.clone();
        steps.extend(keys.into_iter().map(|key| Step::Prop(key.into())));
        Self::from_steps(steps)
    }

    /// Appends a Prism step onto the child at `key`, absent when missing.
    #[must_use]
    pub fn at(&self, key: impl Into<Key>) -> Self {
        self.then(Step::At(key.into()))
    }

    /// Appends a Prism step that is absent when the focus is `null`.
    #[must_use]
    pub fn optional(&self) -> Self {
        self.then(Step::Optional)
    }

    /// Appends a Prism step that is present only when `test` holds.
    #[must_use]
    pub fn when<F>(&self, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.then(Step::When(Predicate::new(test)))
    }

    /// Appends a Prism step onto the first child for which `test` holds.
    #[must_use]
    pub fn find<F>(&self, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.then(Step::Find(Predicate::new(test)))
    }

    /// Appends a Traversal step over every child.
    #[must_use]
    pub fn elems(&self) -> Self {
        self.then(Step::Elems)
    }

    /// Composes `self` then `other`.
    ///
    /// The result has the wider of the two cardinalities.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut steps = self.inner.steps.clone();
        steps.extend(other.inner.steps.iter().cloned());
        Self::from_steps(steps)
    }

    /// The cardinality tag.
    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        self.inner.cardinality
    }

    /// `true` for exactly-one optics.
    #[must_use]
    pub fn is_lens(&self) -> bool {
        self.cardinality() == Cardinality::Lens
    }

    /// `true` for zero-or-one optics.
    #[must_use]
    pub fn is_prism(&self) -> bool {
        self.cardinality() == Cardinality::Prism
    }

    /// `true` for zero-or-many optics.
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        self.cardinality() == Cardinality::Traversal
    }

    /// The steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.inner.steps
    }

    /// Tests whether two optics are the same instance.
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        Arc::ptr_eq(&left.inner, &right.inner)
    }

    fn mode(&self) -> Mode {
        if self.is_lens() { Mode::Strict } else { Mode::Lenient }
    }

    /// Reads the focus, shaped by cardinality.
    ///
    /// # Errors
    ///
    /// For Lens optics, an [`AccessError`] if any step does not resolve.
    /// Prism and Traversal optics never fail on shape mismatches.
    pub fn get<S: Structure>(&self, root: &S) -> Result<Focus<S>, AccessError> {
        let foci = self.collect(root)?;
        Ok(match self.cardinality() {
            Cardinality::Lens => match foci.into_iter().next() {
                Some(focus) => Focus::One(focus),
                None => Focus::Maybe(None),
            },
            Cardinality::Prism => Focus::Maybe(foci.into_iter().next()),
            Cardinality::Traversal => Focus::Many(foci),
        })
    }

    /// Reads the single focus of a Lens.
    ///
    /// For Prism and Traversal optics returns the first focus, or `Null`
    /// when there is none.
    ///
    /// # Errors
    ///
    /// See [`Optic::get`].
    pub fn view(&self, root: &Value) -> Result<Value, AccessError> {
        Ok(self.preview(root)?.unwrap_or_default())
    }

    /// Reads the first focus, if any.
    ///
    /// # Errors
    ///
    /// See [`Optic::get`].
    pub fn preview<S: Structure>(&self, root: &S) -> Result<Option<S>, AccessError> {
        Ok(self.collect(root)?.into_iter().next())
    }

    /// Reads every focus in structural order.
    ///
    /// # Errors
    ///
    /// See [`Optic::get`].
    pub fn collect<S: Structure>(&self, root: &S) -> Result<Vec<S>, AccessError> {
        let mut out = Vec::new();
        eval::collect(self.steps(), root, self.mode(), &mut Path::root(), &mut out)?;
        Ok(out)
    }

    /// Replaces every focus with `value`.
    ///
    /// A Lens whose final key is missing from a record inserts it. Absent
    /// Prism foci leave `root` unchanged.
    ///
    /// # Errors
    ///
    /// For Lens optics, an [`AccessError`] if an intermediate step does not
    /// resolve or a list index is out of range.
    pub fn set<S: Structure>(&self, value: S, root: &S) -> Result<S, AccessError> {
        eval::update(self.steps(), root, self.mode(), &mut Path::root(), &Update::Set(&value))
    }

    /// Replaces every focus with `function` applied to it.
    ///
    /// # Errors
    ///
    /// For Lens optics, an [`AccessError`] if any step does not resolve.
    pub fn modify<S, F>(&self, function: F, root: &S) -> Result<S, AccessError>
    where
        S: Structure,
        F: Fn(S) -> S,
    {
        eval::update(
            self.steps(),
            root,
            self.mode(),
            &mut Path::root(),
            &Update::Modify(&function),
        )
    }

    /// Removes every focus from its parent list.
    ///
    /// Only list elements can be removed. The last child-selecting step of
    /// the optic (`prop`/`at` with an index, `find` or `elems`, optionally
    /// followed by `optional`/`when` filters) must land on a list.
    ///
    /// # Errors
    ///
    /// [`AccessError::RemoveUnsupported`] if the parent is a record, or if the
    /// optic selects no child at all; Lens optics also fail on unresolved steps.
    pub fn remove<S: Structure>(&self, root: &S) -> Result<S, AccessError> {
        let steps = self.steps();
        let Some(split) = steps.iter().rposition(Step::selects_child) else {
            return Err(AccessError::RemoveUnsupported {
                path: Path::root(),
                found: root.kind(),
            });
        };
        let change = Update::Remove {
            selector: &steps[split],
            filters: &steps[split + 1..],
        };
        eval::update(&steps[..split], root, self.mode(), &mut Path::root(), &change)
    }
}

impl PartialEq for Optic {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl Eq for Optic {}

impl Hash for Optic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Display for Optic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("$")?;
        for step in self.steps() {
            write!(formatter, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Optic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Optic({} {self})", self.cardinality())
    }
}

/// The result of reading an optic, shaped by its cardinality.
#[derive(Clone, Debug, PartialEq)]
pub enum Focus<S> {
    /// The focus of a Lens.
    One(S),
    /// The focus of a Prism.
    Maybe(Option<S>),
    /// The foci of a Traversal, in structural order.
    Many(Vec<S>),
}

impl<S> Focus<S> {
    /// Cardinality of the optic that produced this focus.
    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        match self {
            Self::One(_) => Cardinality::Lens,
            Self::Maybe(_) => Cardinality::Prism,
            Self::Many(_) => Cardinality::Traversal,
        }
    }

    /// Returns the Lens focus.
    #[must_use]
    pub fn one(self) -> Option<S> {
        match self {
            Self::One(focus) => Some(focus),
            Self::Maybe(_) | Self::Many(_) => None,
        }
    }

    /// Returns the first focus of any cardinality.
    #[must_use]
    pub fn into_option(self) -> Option<S> {
        match self {
            Self::One(focus) => Some(focus),
            Self::Maybe(focus) => focus,
            Self::Many(foci) => foci.into_iter().next(),
        }
    }

    /// Returns every focus.
    #[must_use]
    pub fn into_vec(self) -> Vec<S> {
        match self {
            Self::One(focus) => vec![focus],
            Self::Maybe(focus) => focus.into_iter().collect(),
            Self::Many(foci) => foci,
        }
    }

    /// Number of foci.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Maybe(focus) => usize::from(focus.is_some()),
            Self::Many(foci) => foci.len(),
        }
    }

    /// Returns `true` when there are no foci.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{list, record};
    use rstest::rstest;

    #[rstest]
    fn test_builder_does_not_touch_receiver() {
        let base = Optic::identity().prop("a");
        let longer = base.at("b");

        assert!(base.is_lens());
        assert!(longer.is_prism());
        assert_eq!(base.steps().len(), 1);
        assert_eq!(longer.steps().len(), 2);
    }

    #[rstest]
    fn test_display() {
        let optic = Optic::identity()
            .prop("items")
            .elems()
            .at("name")
            .prop(0usize)
            .optional();

        assert_eq!(optic.to_string(), "$.items[*].name?[0]?");
        assert_eq!(format!("{optic:?}"), "Optic(Traversal $.items[*].name?[0]?)");
    }

    #[rstest]
    fn test_identity_focuses_root() {
        let root = record! { "a" => 1 };
        assert_eq!(Optic::identity().view(&root).unwrap(), root);
    }

    #[rstest]
    fn test_get_shapes_by_cardinality() {
        let root = record! { "items" => list![1, 2] };

        assert_eq!(
            Optic::identity().path(["items", "0"]).get(&root).unwrap(),
            Focus::One(Value::from(1))
        );
        assert_eq!(
            Optic::identity().prop("items").at(5usize).get(&root).unwrap(),
            Focus::Maybe(None)
        );
        assert_eq!(
            Optic::identity().prop("items").elems().get(&root).unwrap(),
            Focus::Many(vec![Value::from(1), Value::from(2)])
        );
    }

    #[rstest]
    fn test_remove_without_selector_is_unsupported() {
        let root = list![1];
        let error = Optic::identity().optional().remove(&root).unwrap_err();

        assert!(matches!(error, AccessError::RemoveUnsupported { .. }));
    }

    #[rstest]
    fn test_hash_is_identity_based() {
        use std::collections::HashSet;

        let optic = Optic::identity().prop("a");
        let mut set = HashSet::new();
        set.insert(optic.clone());
        set.insert(optic.clone());
        set.insert(Optic::identity().prop("a"));

        assert_eq!(set.len(), 2);
    }
}
