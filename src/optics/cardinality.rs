//! Focus cardinality of an optic.

use std::fmt;

/// How many foci an optic has.
///
/// Composition takes the wider of the two operands:
///
/// ```text
/// Lens ∘ Lens           = Lens
/// Lens ∘ Prism          = Prism
/// Prism ∘ Prism         = Prism
/// _ ∘ Traversal         = Traversal
/// Traversal ∘ _         = Traversal
/// ```
///
/// # Examples
///
/// ```
/// use proform::optics::Cardinality;
///
/// assert_eq!(Cardinality::Lens.widen(Cardinality::Prism), Cardinality::Prism);
/// assert_eq!(Cardinality::Prism.widen(Cardinality::Traversal), Cardinality::Traversal);
/// assert_eq!(Cardinality::Lens.widen(Cardinality::Lens), Cardinality::Lens);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cardinality {
    /// Exactly one focus, always present.
    Lens,
    /// Zero or one focus.
    Prism,
    /// Zero or more foci.
    Traversal,
}

impl Cardinality {
    /// Returns the cardinality of the composition of `self` then `other`.
    #[must_use]
    pub fn widen(self, other: Self) -> Self {
        self.max(other)
    }

    /// Returns the name of this cardinality.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lens => "Lens",
            Self::Prism => "Prism",
            Self::Traversal => "Traversal",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
