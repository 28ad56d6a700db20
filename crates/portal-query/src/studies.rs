//! Per-PMID study aggregation.

use portal_types::{Pmid, StudySummary, TypePopulation};
use tracing::debug;

use crate::error::QueryResult;
use crate::source::PortalSource;

/// Maximum PMIDs per store query when summarizing studies. Keeps the
/// `IN (...)` list and the grouped join work bounded on large result sets.
pub const STUDY_BATCH_SIZE: usize = 1000;

/// Summarizes the publications behind `pmids`: title, year, and the distinct
/// drug and disease mention names per PMID.
///
/// PMIDs without a publication record are omitted. The input is processed in
/// batches of [`STUDY_BATCH_SIZE`], sequentially; the first failing batch
/// aborts the whole aggregation.
pub async fn aggregate_studies<S>(source: &S, pmids: &[Pmid]) -> QueryResult<Vec<StudySummary>>
where
    S: PortalSource + ?Sized,
{
    if pmids.is_empty() {
        return Ok(Vec::new());
    }
    let mut results = Vec::new();
    for batch in pmids.chunks(STUDY_BATCH_SIZE) {
        let rows = source.study_rows(batch).await?;
        debug!(batch = batch.len(), rows = rows.len(), "aggregated study batch");
        results.extend(rows);
    }
    Ok(results)
}

/// Fetches the per-PMID study-type and population aggregates.
///
/// PMIDs with no study-type record are omitted; a PMID with study types but
/// no population rows appears with `population` set to `None`. Unlike
/// [`aggregate_studies`] this runs as a single store query.
pub async fn aggregate_type_population<S>(
    source: &S,
    pmids: &[Pmid],
) -> QueryResult<Vec<TypePopulation>>
where
    S: PortalSource + ?Sized,
{
    if pmids.is_empty() {
        return Ok(Vec::new());
    }
    source.type_population_rows(pmids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    #[tokio::test]
    async fn test_empty_pmids_issue_no_query() {
        let source = MemorySource::new();
        assert!(aggregate_studies(&source, &[]).await.unwrap().is_empty());
        assert!(aggregate_type_population(&source, &[])
            .await
            .unwrap()
            .is_empty());
        assert_eq!(source.queries_issued(), 0);
    }

    #[tokio::test]
    async fn test_batching_matches_single_query() {
        let mut source = MemorySource::new();
        let pmids: Vec<Pmid> = (1..=2500).map(|n| n.to_string()).collect();
        for pmid in &pmids {
            source.insert_publication(pmid, Some("t"), Some("2021"));
        }

        let batched = aggregate_studies(&source, &pmids).await.unwrap();
        // 2500 PMIDs split into batches of 1000
        assert_eq!(source.queries_issued(), 3);
        assert_eq!(batched.len(), pmids.len());

        let single = source.study_rows(&pmids).await.unwrap();
        let mut batched_sorted = batched;
        batched_sorted.sort_by(|a, b| a.pmid.cmp(&b.pmid));
        let mut single_sorted = single;
        single_sorted.sort_by(|a, b| a.pmid.cmp(&b.pmid));
        assert_eq!(batched_sorted, single_sorted);
    }

    #[tokio::test]
    async fn test_pmids_without_publication_are_omitted() {
        let mut source = MemorySource::new();
        source.insert_publication("100", Some("Known"), Some("2019"));
        let rows = aggregate_studies(&source, &["100".to_string(), "999".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pmid, "100");
    }

    #[tokio::test]
    async fn test_na_disease_mentions_are_dropped_drugs_kept() {
        let mut source = MemorySource::new();
        source.insert_publication("100", Some("Trial"), Some("2020"));
        source.insert_drug_link("100", "C0004057", Some("NA"));
        source.insert_disease_link("100", "C0011849", Some("NA"));
        let rows = aggregate_studies(&source, &["100".to_string()]).await.unwrap();
        // The literal "NA" is filtered from disease mentions only
        assert_eq!(rows[0].studied_drugs.as_deref(), Some("NA"));
        assert!(rows[0].studied_diseases.is_none());
    }

    #[tokio::test]
    async fn test_type_population_is_single_query() {
        let mut source = MemorySource::new();
        for n in 1..=2500 {
            source.insert_study_type(&n.to_string(), "clinical trial");
        }
        let pmids: Vec<Pmid> = (1..=2500).map(|n| n.to_string()).collect();
        let rows = aggregate_type_population(&source, &pmids).await.unwrap();
        assert_eq!(rows.len(), 2500);
        assert_eq!(source.queries_issued(), 1);
    }
}
