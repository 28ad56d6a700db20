//! Controlled-vocabulary concept types.
//!
//! A concept is the result of resolving a drug or disease name against the
//! vocabulary store: a CUI paired with its type.

use crate::Cui;

/// Whether a concept denotes a drug or a disease.
///
/// The vocabulary store records the type as a free-form string; anything
/// other than `"drug"` (case-insensitive) normalizes to [`ConceptType::Disease`],
/// matching the portal's historical behavior.
///
/// # Examples
///
/// ```
/// use portal_types::ConceptType;
///
/// assert_eq!(ConceptType::from_db_str("drug"), ConceptType::Drug);
/// assert_eq!(ConceptType::from_db_str("DRUG"), ConceptType::Drug);
/// assert_eq!(ConceptType::from_db_str("finding"), ConceptType::Disease);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConceptType {
    /// A drug concept.
    Drug,
    /// A disease concept.
    Disease,
}

impl ConceptType {
    /// Returns the lowercase string form stored in the vocabulary tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drug => "drug",
            Self::Disease => "disease",
        }
    }

    /// Normalizes a raw type string from the store.
    ///
    /// Only `"drug"` (any case) maps to [`ConceptType::Drug`]; everything
    /// else, including unexpected values, maps to [`ConceptType::Disease`].
    pub fn from_db_str(value: &str) -> Self {
        if value.eq_ignore_ascii_case("drug") {
            Self::Drug
        } else {
            Self::Disease
        }
    }
}

/// A resolved concept: a CUI plus its type.
///
/// Concepts are immutable value objects; uniqueness within a result set is
/// by the `(type, cui)` pair.
///
/// # Examples
///
/// ```
/// use portal_types::{Concept, ConceptType};
///
/// let c = Concept::new("C0004057", ConceptType::Drug);
/// assert!(c.is_drug());
/// assert_eq!(c.cui, "C0004057");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// The concept's CUI.
    pub cui: Cui,
    /// Whether the concept is a drug or a disease.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub concept_type: ConceptType,
}

impl Concept {
    /// Creates a concept from a CUI and type.
    pub fn new(cui: impl Into<Cui>, concept_type: ConceptType) -> Self {
        Self {
            cui: cui.into(),
            concept_type,
        }
    }

    /// Creates a drug concept.
    pub fn drug(cui: impl Into<Cui>) -> Self {
        Self::new(cui, ConceptType::Drug)
    }

    /// Creates a disease concept.
    pub fn disease(cui: impl Into<Cui>) -> Self {
        Self::new(cui, ConceptType::Disease)
    }

    /// Returns true if this is a drug concept.
    pub fn is_drug(&self) -> bool {
        self.concept_type == ConceptType::Drug
    }

    /// Returns true if this is a disease concept.
    pub fn is_disease(&self) -> bool {
        self.concept_type == ConceptType::Disease
    }
}
