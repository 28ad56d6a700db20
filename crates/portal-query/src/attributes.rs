//! Drug attribute fetching.
//!
//! Pulls rows from the six per-drug attribute tables (ATC hierarchy, EPC,
//! MOA, PE, PK, label statistics) for the drug concepts in a result set.

use std::collections::HashSet;

use portal_types::{AttributeRow, AttributeTable, ConceptSet};
use tracing::debug;

use crate::error::QueryResult;
use crate::source::PortalSource;

/// Fetches the attribute rows of one table for every drug concept in `concepts`.
///
/// Disease concepts are ignored. When the set contains no drug concepts the
/// store is not queried. Rows are deduplicated by full value (the surrogate
/// id column is already excluded at the source), keeping first-occurrence
/// order.
pub async fn fetch_attributes<S>(
    source: &S,
    table: AttributeTable,
    concepts: &ConceptSet,
) -> QueryResult<Vec<AttributeRow>>
where
    S: PortalSource + ?Sized,
{
    let drug_cuis = concepts.drug_cuis();
    if drug_cuis.is_empty() {
        return Ok(Vec::new());
    }
    let rows = source.attribute_rows(table, &drug_cuis).await?;
    let mut seen = HashSet::new();
    let out: Vec<_> = rows
        .into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect();
    debug!(table = table.table_name(), rows = out.len(), "fetched attributes");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use portal_types::{AtcRow, Concept, EpcRow};

    fn epc(cui: &str, epc: &str) -> AttributeRow {
        AttributeRow::Epc(EpcRow {
            cui: cui.into(),
            epc: epc.into(),
        })
    }

    #[tokio::test]
    async fn test_disease_only_set_issues_no_query() {
        let source = MemorySource::new();
        let concepts: ConceptSet = vec![Concept::disease("C0011849")].into();
        let rows = fetch_attributes(&source, AttributeTable::Epc, &concepts)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(source.queries_issued(), 0);
    }

    #[tokio::test]
    async fn test_rows_dedup_by_value() {
        let mut source = MemorySource::new();
        // Two store rows that differed only in the dropped id column
        source.insert_attribute(epc("C0004057", "NSAID"));
        source.insert_attribute(epc("C0004057", "NSAID"));
        source.insert_attribute(epc("C0004057", "Analgesic"));
        let concepts: ConceptSet = vec![Concept::drug("C0004057")].into();
        let rows = fetch_attributes(&source, AttributeTable::Epc, &concepts)
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![epc("C0004057", "NSAID"), epc("C0004057", "Analgesic")]
        );
    }

    #[tokio::test]
    async fn test_only_drug_cuis_are_queried() {
        let mut source = MemorySource::new();
        source.insert_attribute(epc("C0004057", "NSAID"));
        // Same CUI present as a disease attribute row; a disease concept
        // must not pull it.
        let concepts: ConceptSet =
            vec![Concept::disease("C0004057"), Concept::drug("C0025598")].into();
        let rows = fetch_attributes(&source, AttributeTable::Epc, &concepts)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_multi_column_rows_survive() {
        let mut source = MemorySource::new();
        source.insert_attribute(AttributeRow::Atc(AtcRow {
            cui: "C0004057".into(),
            l1: "NERVOUS SYSTEM".into(),
            l2: "ANALGESICS".into(),
            l3: "OTHER ANALGESICS AND ANTIPYRETICS".into(),
            l4: "Salicylic acid and derivatives".into(),
            atc_code: "N02BA01".into(),
        }));
        let concepts: ConceptSet = vec![Concept::drug("C0004057")].into();
        let rows = fetch_attributes(&source, AttributeTable::Atc, &concepts)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].table(), AttributeTable::Atc);
    }
}
