//! Ordered, deduplicated concept collections.

use std::collections::HashSet;

use crate::{Concept, ConceptType, Cui};

/// An ordered, deduplicated list of concepts.
///
/// Built incrementally by unioning resolver outputs (direct name matches plus
/// ontology-child expansion). No two elements share both `cui` and `type`;
/// insertion order is preserved for the first occurrence of each pair.
///
/// # Examples
///
/// ```
/// use portal_types::{Concept, ConceptSet};
///
/// let mut set = ConceptSet::new();
/// set.insert(Concept::disease("C0011849"));
/// set.insert(Concept::drug("C0004057"));
/// set.insert(Concept::disease("C0011849")); // ignored
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.disease_cuis(), vec!["C0011849"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConceptSet {
    concepts: Vec<Concept>,
    #[cfg_attr(feature = "serde", serde(skip))]
    seen: HashSet<(ConceptType, Cui)>,
}

impl ConceptSet {
    /// Creates an empty concept set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a concept, ignoring it if its `(type, cui)` pair is already
    /// present. Returns true if the concept was newly inserted.
    pub fn insert(&mut self, concept: Concept) -> bool {
        if self
            .seen
            .insert((concept.concept_type, concept.cui.clone()))
        {
            self.concepts.push(concept);
            true
        } else {
            false
        }
    }

    /// Inserts every concept from an iterator, deduplicating as it goes.
    pub fn extend(&mut self, concepts: impl IntoIterator<Item = Concept>) {
        for concept in concepts {
            self.insert(concept);
        }
    }

    /// Returns true if the set contains no concepts.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Returns the number of distinct concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns true if a `(type, cui)` pair is present.
    pub fn contains(&self, concept: &Concept) -> bool {
        self.seen
            .contains(&(concept.concept_type, concept.cui.clone()))
    }

    /// Iterates over the concepts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    /// Returns the CUIs of all drug concepts, in insertion order.
    pub fn drug_cuis(&self) -> Vec<Cui> {
        self.concepts
            .iter()
            .filter(|c| c.is_drug())
            .map(|c| c.cui.clone())
            .collect()
    }

    /// Returns the CUIs of all disease concepts, in insertion order.
    pub fn disease_cuis(&self) -> Vec<Cui> {
        self.concepts
            .iter()
            .filter(|c| c.is_disease())
            .map(|c| c.cui.clone())
            .collect()
    }

    /// Returns true if the set is non-empty and every concept is a disease.
    ///
    /// This is the trigger condition for ontology-child expansion when a
    /// single search name was given.
    pub fn all_diseases(&self) -> bool {
        !self.concepts.is_empty() && self.concepts.iter().all(Concept::is_disease)
    }

    /// Consumes the set, returning the concepts in insertion order.
    pub fn into_vec(self) -> Vec<Concept> {
        self.concepts
    }
}

impl FromIterator<Concept> for ConceptSet {
    fn from_iter<I: IntoIterator<Item = Concept>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<Concept>> for ConceptSet {
    fn from(concepts: Vec<Concept>) -> Self {
        concepts.into_iter().collect()
    }
}

impl IntoIterator for ConceptSet {
    type Item = Concept;
    type IntoIter = std::vec::IntoIter<Concept>;

    fn into_iter(self) -> Self::IntoIter {
        self.concepts.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConceptSet {
    type Item = &'a Concept;
    type IntoIter = std::slice::Iter<'a, Concept>;

    fn into_iter(self) -> Self::IntoIter {
        self.concepts.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConceptSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let concepts = Vec::<Concept>::deserialize(deserializer)?;
        Ok(Self::from(concepts))
    }
}
