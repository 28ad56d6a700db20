//! Name-to-concept resolution.
//!
//! Resolves user-supplied drug and disease names to CUIs, widening
//! disease searches by one level of ontology children.

use portal_types::{Concept, ConceptSet};
use tracing::debug;

use crate::error::QueryResult;
use crate::source::PortalSource;

/// A concept-resolution request: a drug name, a disease name, or both.
///
/// `None` means the field was not searched. Callers are expected to trim
/// input and map blank strings to `None` before building the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptQuery {
    /// Drug name to resolve, if any.
    pub drug_name: Option<String>,
    /// Disease name to resolve, if any.
    pub disease_name: Option<String>,
}

impl ConceptQuery {
    /// Builds a query from raw user input, trimming whitespace and treating
    /// blank strings as absent.
    pub fn from_input(drug_name: Option<&str>, disease_name: Option<&str>) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            drug_name: clean(drug_name),
            disease_name: clean(disease_name),
        }
    }

    /// Returns true if neither field was searched.
    pub fn is_empty(&self) -> bool {
        self.drug_name.is_none() && self.disease_name.is_none()
    }
}

/// Resolves a [`ConceptQuery`] to the set of matched concepts.
///
/// Lookup is exact-match on the canonical name. When a single name is
/// searched and every match is a disease, the result is widened by the
/// matches' direct ontology children (one level, typed as diseases). When
/// both names are searched, the disease name's matches are widened
/// unconditionally. An empty query issues no store queries.
///
/// The result is deduplicated by `(type, cui)` with first-occurrence order:
/// direct matches precede children.
pub async fn resolve_concepts<S>(source: &S, query: &ConceptQuery) -> QueryResult<ConceptSet>
where
    S: PortalSource + ?Sized,
{
    match (&query.drug_name, &query.disease_name) {
        (None, None) => Ok(ConceptSet::new()),
        (Some(name), None) | (None, Some(name)) => resolve_single(source, name).await,
        (Some(drug_name), Some(disease_name)) => {
            let mut set = ConceptSet::new();
            set.extend(source.concepts_by_name(drug_name).await?);
            let disease_concepts = source.concepts_by_name(disease_name).await?;
            let parent_cuis: Vec<_> = disease_concepts.iter().map(|c| c.cui.clone()).collect();
            set.extend(disease_concepts);
            // No matches for the disease name means nothing to expand
            if !parent_cuis.is_empty() {
                for child in source.disease_children(&parent_cuis).await? {
                    set.insert(Concept::disease(child));
                }
            }
            debug!(
                drug = %drug_name,
                disease = %disease_name,
                concepts = set.len(),
                "resolved concepts"
            );
            Ok(set)
        }
    }
}

async fn resolve_single<S>(source: &S, name: &str) -> QueryResult<ConceptSet>
where
    S: PortalSource + ?Sized,
{
    let mut set: ConceptSet = source.concepts_by_name(name).await?.into_iter().collect();
    // Widen pure disease matches one level down. A mixed or drug result is
    // returned as-is.
    if set.all_diseases() {
        let parents = set.disease_cuis();
        for child in source.disease_children(&parents).await? {
            set.insert(Concept::disease(child));
        }
    }
    debug!(name, concepts = set.len(), "resolved concepts");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    fn source_with_ontology() -> MemorySource {
        let mut source = MemorySource::new();
        source.insert_concept("aspirin", Concept::drug("C0004057"));
        source.insert_concept("diabetes", Concept::disease("C0011849"));
        source.insert_concept("diabetes", Concept::disease("C0011860"));
        source.insert_child("C0011849", "C0271650");
        source.insert_child("C0011860", "C0271640");
        source.insert_child("C0271650", "C9999999"); // grandchild, never expanded
        source
    }

    #[tokio::test]
    async fn test_empty_query_issues_no_store_queries() {
        let source = MemorySource::new();
        let set = resolve_concepts(&source, &ConceptQuery::default())
            .await
            .unwrap();
        assert!(set.is_empty());
        assert_eq!(source.queries_issued(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_maps_to_empty_query() {
        let query = ConceptQuery::from_input(Some("   "), Some(""));
        assert!(query.is_empty());
    }

    #[tokio::test]
    async fn test_drug_match_skips_expansion() {
        let source = source_with_ontology();
        let query = ConceptQuery::from_input(Some("aspirin"), None);
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert_eq!(set.into_vec(), vec![Concept::drug("C0004057")]);
        // One name lookup, no child query
        assert_eq!(source.queries_issued(), 1);
    }

    #[tokio::test]
    async fn test_disease_match_expands_one_level() {
        let source = source_with_ontology();
        let query = ConceptQuery::from_input(None, Some("diabetes"));
        let set = resolve_concepts(&source, &query).await.unwrap();
        let cuis: Vec<_> = set.iter().map(|c| c.cui.clone()).collect();
        assert_eq!(cuis, vec!["C0011849", "C0011860", "C0271650", "C0271640"]);
        assert!(set.all_diseases());
        // Grandchildren are not reached
        assert!(!set.contains(&Concept::disease("C9999999")));
        assert_eq!(source.queries_issued(), 2);
    }

    #[tokio::test]
    async fn test_disease_name_in_drug_field_still_expands() {
        // Expansion follows the matched types, not which field was searched.
        let source = source_with_ontology();
        let query = ConceptQuery::from_input(Some("diabetes"), None);
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert_eq!(set.len(), 4);
    }

    #[tokio::test]
    async fn test_mixed_matches_skip_expansion() {
        let mut source = source_with_ontology();
        source.insert_concept("ambiguous", Concept::drug("C0000001"));
        source.insert_concept("ambiguous", Concept::disease("C0011849"));
        let query = ConceptQuery::from_input(Some("ambiguous"), None);
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&Concept::disease("C0271650")));
    }

    #[tokio::test]
    async fn test_unknown_name_yields_empty_set() {
        let source = source_with_ontology();
        let query = ConceptQuery::from_input(Some("no such drug"), None);
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert!(set.is_empty());
        // Empty match is not all-diseases, so no child query follows
        assert_eq!(source.queries_issued(), 1);
    }

    #[tokio::test]
    async fn test_combined_query_unions_and_dedups() {
        let mut source = source_with_ontology();
        // A child that also matches the drug name directly, as a disease
        source.insert_concept("aspirin", Concept::disease("C0271650"));
        let query = ConceptQuery::from_input(Some("aspirin"), Some("diabetes"));
        let set = resolve_concepts(&source, &query).await.unwrap();
        let cuis: Vec<_> = set.iter().map(|c| c.cui.clone()).collect();
        // Drug matches first, then disease matches, then children; the
        // duplicate C0271650 keeps its first position.
        assert_eq!(
            cuis,
            vec!["C0004057", "C0271650", "C0011849", "C0011860", "C0271640"]
        );
        assert_eq!(source.queries_issued(), 3);
    }

    #[tokio::test]
    async fn test_combined_query_skips_expansion_without_disease_matches() {
        let source = source_with_ontology();
        let query = ConceptQuery::from_input(Some("aspirin"), Some("no such disease"));
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert_eq!(set.into_vec(), vec![Concept::drug("C0004057")]);
        // Two name lookups, no child query for an unmatched disease name
        assert_eq!(source.queries_issued(), 2);
    }

    #[tokio::test]
    async fn test_combined_query_expands_disease_side_unconditionally() {
        let mut source = MemorySource::new();
        // The disease field resolved to a drug-typed concept; its children
        // are still fetched.
        source.insert_concept("metformin", Concept::drug("C0025598"));
        source.insert_concept("odd", Concept::drug("C0000009"));
        source.insert_child("C0000009", "C0000010");
        let query = ConceptQuery::from_input(Some("metformin"), Some("odd"));
        let set = resolve_concepts(&source, &query).await.unwrap();
        assert!(set.contains(&Concept::disease("C0000010")));
    }
}
