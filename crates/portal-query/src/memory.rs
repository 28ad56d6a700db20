//! In-memory implementation of [`PortalSource`].
//!
//! Backs the unit tests and local development without a MySQL instance. The
//! store reproduces the relational semantics the SQL implementation relies
//! on (DISTINCT projections, inner-join intersection, grouped joined lists,
//! the `"NA"` disease-mention filter) so code exercised against it behaves
//! the same against the real database.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use portal_types::{
    AttributeRow, AttributeTable, Concept, Cui, Pmid, StudySummary, TypePopulation,
    LIST_SEPARATOR,
};

use crate::error::QueryResult;
use crate::source::PortalSource;

/// A publication's title and year.
#[derive(Debug, Clone, Default)]
pub struct Publication {
    /// Publication title, if known.
    pub title: Option<String>,
    /// Publication year, if known.
    pub year: Option<String>,
}

/// An in-memory portal data store.
///
/// Populate it with the `insert_*` methods, then hand it to the query
/// functions as a [`PortalSource`]. Every trait method increments a counter
/// so tests can assert how many store round trips an operation issued.
///
/// # Examples
///
/// ```
/// use portal_query::MemorySource;
/// use portal_types::Concept;
///
/// let mut source = MemorySource::new();
/// source.insert_concept("aspirin", Concept::drug("C0004057"));
/// assert_eq!(source.queries_issued(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    concepts_by_name: HashMap<String, Vec<Concept>>,
    children_by_parent: HashMap<Cui, Vec<Cui>>,
    attributes: HashMap<AttributeTable, Vec<AttributeRow>>,
    /// (pmid, cui, mention text) triples, one per link row.
    drug_links: Vec<(Pmid, Cui, Option<String>)>,
    disease_links: Vec<(Pmid, Cui, Option<String>)>,
    publications: HashMap<Pmid, Publication>,
    study_types: Vec<(Pmid, String)>,
    populations: Vec<(Pmid, String)>,
    query_count: AtomicUsize,
}

impl MemorySource {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store queries issued so far.
    pub fn queries_issued(&self) -> usize {
        self.query_count.load(Ordering::Relaxed)
    }

    fn record_query(&self) {
        self.query_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Registers a concept under a canonical name. A name may map to several
    /// concepts, matching the vocabulary table.
    pub fn insert_concept(&mut self, name: &str, concept: Concept) {
        self.concepts_by_name
            .entry(name.to_string())
            .or_default()
            .push(concept);
    }

    /// Registers an ontology parent/child edge.
    pub fn insert_child(&mut self, parent: &str, child: &str) {
        self.children_by_parent
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
    }

    /// Registers an attribute row under its table.
    pub fn insert_attribute(&mut self, row: AttributeRow) {
        self.attributes.entry(row.table()).or_default().push(row);
    }

    /// Registers a PMID-to-drug link with its mention text.
    pub fn insert_drug_link(&mut self, pmid: &str, cui: &str, text: Option<&str>) {
        self.drug_links
            .push((pmid.to_string(), cui.to_string(), text.map(str::to_string)));
    }

    /// Registers a PMID-to-disease link with its mention text.
    pub fn insert_disease_link(&mut self, pmid: &str, cui: &str, text: Option<&str>) {
        self.disease_links
            .push((pmid.to_string(), cui.to_string(), text.map(str::to_string)));
    }

    /// Registers a publication record.
    pub fn insert_publication(&mut self, pmid: &str, title: Option<&str>, year: Option<&str>) {
        self.publications.insert(
            pmid.to_string(),
            Publication {
                title: title.map(str::to_string),
                year: year.map(str::to_string),
            },
        );
    }

    /// Registers a study-type label for a PMID.
    pub fn insert_study_type(&mut self, pmid: &str, study_type: &str) {
        self.study_types
            .push((pmid.to_string(), study_type.to_string()));
    }

    /// Registers a population label for a PMID.
    pub fn insert_population(&mut self, pmid: &str, population: &str) {
        self.populations
            .push((pmid.to_string(), population.to_string()));
    }

    fn distinct_pmids(links: &[(Pmid, Cui, Option<String>)], cuis: &[Cui]) -> Vec<Pmid> {
        let wanted: HashSet<&str> = cuis.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (pmid, cui, _) in links {
            if wanted.contains(cui.as_str()) && seen.insert(pmid.clone()) {
                out.push(pmid.clone());
            }
        }
        out
    }

    /// Joins distinct non-empty values with [`LIST_SEPARATOR`], like
    /// `GROUP_CONCAT(DISTINCT ...)`. Returns `None` when nothing survives.
    fn join_distinct<I>(values: I) -> Option<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let mut parts = Vec::new();
        for value in values {
            if seen.insert(value.clone()) {
                parts.push(value);
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(LIST_SEPARATOR))
        }
    }
}

#[async_trait]
impl PortalSource for MemorySource {
    async fn concepts_by_name(&self, name: &str) -> QueryResult<Vec<Concept>> {
        self.record_query();
        let mut seen = HashSet::new();
        Ok(self
            .concepts_by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter(|c| seen.insert(((*c).concept_type, c.cui.clone())))
            .cloned()
            .collect())
    }

    async fn disease_children(&self, cuis: &[Cui]) -> QueryResult<Vec<Cui>> {
        self.record_query();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for parent in cuis {
            for child in self.children_by_parent.get(parent).into_iter().flatten() {
                if seen.insert(child.clone()) {
                    out.push(child.clone());
                }
            }
        }
        Ok(out)
    }

    async fn attribute_rows(
        &self,
        table: AttributeTable,
        cuis: &[Cui],
    ) -> QueryResult<Vec<AttributeRow>> {
        self.record_query();
        let wanted: HashSet<&str> = cuis.iter().map(String::as_str).collect();
        Ok(self
            .attributes
            .get(&table)
            .into_iter()
            .flatten()
            .filter(|row| wanted.contains(row.cui()))
            .cloned()
            .collect())
    }

    async fn pmids_for_drugs(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>> {
        self.record_query();
        Ok(Self::distinct_pmids(&self.drug_links, cuis))
    }

    async fn pmids_for_diseases(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>> {
        self.record_query();
        Ok(Self::distinct_pmids(&self.disease_links, cuis))
    }

    async fn pmids_for_drugs_and_diseases(
        &self,
        drug_cuis: &[Cui],
        disease_cuis: &[Cui],
    ) -> QueryResult<Vec<Pmid>> {
        self.record_query();
        let by_drug = Self::distinct_pmids(&self.drug_links, drug_cuis);
        let by_disease: HashSet<Pmid> =
            Self::distinct_pmids(&self.disease_links, disease_cuis)
                .into_iter()
                .collect();
        Ok(by_drug
            .into_iter()
            .filter(|pmid| by_disease.contains(pmid))
            .collect())
    }

    async fn study_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<StudySummary>> {
        self.record_query();
        let mut out = Vec::new();
        // BTreeMap keeps output ordering deterministic across runs.
        let wanted: BTreeMap<&str, &Publication> = pmids
            .iter()
            .filter_map(|p| self.publications.get_key_value(p))
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        for (pmid, publication) in wanted {
            let drugs = Self::join_distinct(
                self.drug_links
                    .iter()
                    .filter(|(p, _, _)| p == pmid)
                    .filter_map(|(_, _, text)| text.clone()),
            );
            // Disease mentions drop NULL and the literal "NA"; drug mentions
            // pass through unfiltered.
            let diseases = Self::join_distinct(
                self.disease_links
                    .iter()
                    .filter(|(p, _, _)| p == pmid)
                    .filter_map(|(_, _, text)| text.clone())
                    .filter(|text| text != "NA"),
            );
            out.push(StudySummary {
                pmid: pmid.to_string(),
                title: publication.title.clone(),
                year: publication.year.clone(),
                studied_drugs: drugs,
                studied_diseases: diseases,
            });
        }
        Ok(out)
    }

    async fn type_population_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<TypePopulation>> {
        self.record_query();
        let wanted: HashSet<&str> = pmids.iter().map(String::as_str).collect();
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (pmid, study_type) in &self.study_types {
            if wanted.contains(pmid.as_str()) {
                grouped.entry(pmid).or_default().push(study_type.clone());
            }
        }
        let mut out = Vec::new();
        for (pmid, types) in grouped {
            let population = Self::join_distinct(
                self.populations
                    .iter()
                    .filter(|(p, _)| p == pmid)
                    .map(|(_, label)| label.clone()),
            );
            out.push(TypePopulation {
                pmid: pmid.to_string(),
                study_type: Self::join_distinct(types).unwrap_or_default(),
                population,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_types::{split_list, AttributeRow, EpcRow};

    fn store() -> MemorySource {
        let mut source = MemorySource::new();
        source.insert_concept("aspirin", Concept::drug("C0004057"));
        source.insert_concept("aspirin", Concept::drug("C0004057"));
        source.insert_child("C0011849", "C0011860");
        source.insert_drug_link("100", "C0004057", Some("aspirin"));
        source.insert_drug_link("100", "C0004057", Some("aspirin"));
        source.insert_disease_link("100", "C0011849", Some("NA"));
        source.insert_disease_link("100", "C0011849", Some("diabetes"));
        source.insert_publication("100", Some("Trial"), Some("2020"));
        source
    }

    #[tokio::test]
    async fn test_concept_lookup_is_distinct() {
        let source = store();
        let concepts = source.concepts_by_name("aspirin").await.unwrap();
        assert_eq!(concepts.len(), 1);
        assert_eq!(source.queries_issued(), 1);
    }

    #[tokio::test]
    async fn test_study_rows_filters_na_diseases_only() {
        let source = store();
        let rows = source.study_rows(&["100".to_string()]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].studied_drugs.as_deref(), Some("aspirin"));
        assert_eq!(rows[0].studied_diseases.as_deref(), Some("diabetes"));
    }

    #[tokio::test]
    async fn test_study_rows_skip_missing_publications() {
        let source = store();
        let rows = source.study_rows(&["999".to_string()]).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_joined_pmids_require_both_links() {
        let mut source = store();
        source.insert_drug_link("200", "C0004057", Some("aspirin"));
        let pmids = source
            .pmids_for_drugs_and_diseases(
                &["C0004057".to_string()],
                &["C0011849".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(pmids, vec!["100".to_string()]);
    }

    #[tokio::test]
    async fn test_attribute_rows_filter_by_cui() {
        let mut source = MemorySource::new();
        source.insert_attribute(AttributeRow::Epc(EpcRow {
            cui: "C0004057".into(),
            epc: "Nonsteroidal Anti-inflammatory Drug".into(),
        }));
        source.insert_attribute(AttributeRow::Epc(EpcRow {
            cui: "C0699142".into(),
            epc: "Analgesic".into(),
        }));
        let rows = source
            .attribute_rows(AttributeTable::Epc, &["C0004057".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cui(), "C0004057");
    }

    #[tokio::test]
    async fn test_type_population_rows_without_population() {
        let mut source = MemorySource::new();
        source.insert_study_type("300", "case report");
        source.insert_study_type("300", "clinical trial");
        source.insert_study_type("300", "case report");
        let rows = source
            .type_population_rows(&["300".to_string()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].study_type, "case report / clinical trial");
        assert_eq!(
            split_list(Some(&rows[0].study_type)),
            vec!["case report", "clinical trial"]
        );
        assert!(rows[0].population.is_none());
    }
}
