//! Concept-to-literature resolution.
//!
//! Maps a resolved concept set to the PMIDs that mention it, honoring the
//! caller's search-type selection.

use portal_types::{ConceptSet, Pmid, SearchType};
use tracing::debug;

use crate::error::QueryResult;
use crate::source::PortalSource;

/// Resolves the PMIDs matching `concepts` under the given search selection.
///
/// A search field counts as active only when it is both selected in
/// `search_type` and represented by at least one concept of that type in the
/// set. With both fields active the result is the intersection: PMIDs linked
/// to at least one selected drug CUI AND at least one selected disease CUI.
/// With one field active it is the distinct PMIDs linked to that field's
/// CUIs. With none active (or an empty set) the store is not queried and the
/// result is empty.
pub async fn resolve_pmids<S>(
    source: &S,
    concepts: &ConceptSet,
    search_type: &SearchType,
) -> QueryResult<Vec<Pmid>>
where
    S: PortalSource + ?Sized,
{
    if concepts.is_empty() {
        return Ok(Vec::new());
    }

    let drug_cuis = concepts.drug_cuis();
    let disease_cuis = concepts.disease_cuis();
    let drug_active = search_type.includes_drug() && !drug_cuis.is_empty();
    let disease_active = search_type.includes_disease() && !disease_cuis.is_empty();

    let pmids = match (drug_active, disease_active) {
        (false, false) => Vec::new(),
        (true, true) => {
            source
                .pmids_for_drugs_and_diseases(&drug_cuis, &disease_cuis)
                .await?
        }
        (true, false) => source.pmids_for_drugs(&drug_cuis).await?,
        (false, true) => source.pmids_for_diseases(&disease_cuis).await?,
    };
    debug!(
        drug_active,
        disease_active,
        pmids = pmids.len(),
        "resolved pmids"
    );
    Ok(pmids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use portal_types::{Concept, SearchField};

    /// Three publications: P1 mentions only the drug, P2 only the disease,
    /// P3 both.
    fn literature() -> MemorySource {
        let mut source = MemorySource::new();
        source.insert_drug_link("1", "C0004057", Some("aspirin"));
        source.insert_disease_link("2", "C0011849", Some("diabetes"));
        source.insert_drug_link("3", "C0004057", Some("aspirin"));
        source.insert_disease_link("3", "C0011849", Some("diabetes"));
        source
    }

    fn both_concepts() -> ConceptSet {
        vec![Concept::drug("C0004057"), Concept::disease("C0011849")].into()
    }

    #[tokio::test]
    async fn test_empty_concepts_issue_no_query() {
        let source = literature();
        let pmids = resolve_pmids(&source, &ConceptSet::new(), &SearchType::from(SearchField::Drug))
            .await
            .unwrap();
        assert!(pmids.is_empty());
        assert_eq!(source.queries_issued(), 0);
    }

    #[tokio::test]
    async fn test_both_selected_intersects_not_unions() {
        let source = literature();
        let search = SearchType::from(vec![SearchField::Drug, SearchField::Disease]);
        let pmids = resolve_pmids(&source, &both_concepts(), &search)
            .await
            .unwrap();
        assert_eq!(pmids, vec!["3".to_string()]);
        assert_eq!(source.queries_issued(), 1);
    }

    #[tokio::test]
    async fn test_drug_only_selection() {
        let source = literature();
        let pmids = resolve_pmids(
            &source,
            &both_concepts(),
            &SearchType::from(SearchField::Drug),
        )
        .await
        .unwrap();
        assert_eq!(pmids, vec!["1".to_string(), "3".to_string()]);
    }

    #[tokio::test]
    async fn test_disease_only_selection() {
        let source = literature();
        let pmids = resolve_pmids(
            &source,
            &both_concepts(),
            &SearchType::from(SearchField::Disease),
        )
        .await
        .unwrap();
        assert_eq!(pmids, vec!["2".to_string(), "3".to_string()]);
    }

    #[tokio::test]
    async fn test_selected_field_without_concepts_falls_back() {
        let source = literature();
        // Both fields selected but the set has only drug concepts, so the
        // disease side is inactive and the drug-only query runs.
        let concepts: ConceptSet = vec![Concept::drug("C0004057")].into();
        let search = SearchType::from(vec![SearchField::Drug, SearchField::Disease]);
        let pmids = resolve_pmids(&source, &concepts, &search).await.unwrap();
        assert_eq!(pmids, vec!["1".to_string(), "3".to_string()]);
    }

    #[tokio::test]
    async fn test_no_active_field_is_empty_without_query() {
        let source = literature();
        // Disease selected, drug-only concepts
        let concepts: ConceptSet = vec![Concept::drug("C0004057")].into();
        let pmids = resolve_pmids(
            &source,
            &concepts,
            &SearchType::from(SearchField::Disease),
        )
        .await
        .unwrap();
        assert!(pmids.is_empty());
        assert_eq!(source.queries_issued(), 0);
    }
}
