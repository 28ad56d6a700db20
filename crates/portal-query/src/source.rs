//! The data-store seam.
//!
//! All table access goes through [`PortalSource`] so the resolver and
//! aggregator functions stay independent of the concrete store. The hosting
//! service owns the connection pool and injects a [`crate::MySqlSource`];
//! tests inject a [`crate::MemorySource`].

use async_trait::async_trait;
use portal_types::{
    AttributeRow, AttributeTable, Concept, Cui, Pmid, StudySummary, TypePopulation,
};

use crate::error::QueryResult;

/// A handle to the portal's relational tables.
///
/// Implementations run one read-only query per method call. Composition
/// rules (empty-input short-circuits, expansion decisions, set union and
/// dedup, batching) live in the functions of this crate, above this trait,
/// so callers get identical semantics from every implementation.
#[async_trait]
pub trait PortalSource: Send + Sync {
    /// Exact-match concept lookup by canonical name
    /// (`SELECT DISTINCT cui, type FROM concept WHERE name = ?`).
    async fn concepts_by_name(&self, name: &str) -> QueryResult<Vec<Concept>>;

    /// One level of ontology-child expansion: the distinct `cui2` values of
    /// `rel` rows whose `cui1` is in `cuis`.
    async fn disease_children(&self, cuis: &[Cui]) -> QueryResult<Vec<Cui>>;

    /// All rows of an attribute table whose CUI is in `cuis`. The table's
    /// surrogate id column is never selected; rows may repeat.
    async fn attribute_rows(
        &self,
        table: AttributeTable,
        cuis: &[Cui],
    ) -> QueryResult<Vec<AttributeRow>>;

    /// Distinct PMIDs linked to any of the given drug CUIs.
    async fn pmids_for_drugs(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>>;

    /// Distinct PMIDs linked to any of the given disease CUIs.
    async fn pmids_for_diseases(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>>;

    /// Distinct PMIDs linked to at least one of the given drug CUIs AND at
    /// least one of the given disease CUIs (inner-join semantics on pmid).
    async fn pmids_for_drugs_and_diseases(
        &self,
        drug_cuis: &[Cui],
        disease_cuis: &[Cui],
    ) -> QueryResult<Vec<Pmid>>;

    /// One summarized row per PMID in `pmids` that has a publication record:
    /// title, year, and the distinct drug/disease mention names joined with
    /// `" / "`. Disease mentions equal to the literal `"NA"` (or NULL) are
    /// excluded; drug mentions are not filtered.
    async fn study_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<StudySummary>>;

    /// One row per PMID in `pmids` that has study-type records, with joined
    /// distinct study-type and population labels. Population may be absent.
    async fn type_population_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<TypePopulation>>;
}
