//! MySQL implementation of [`PortalSource`].
//!
//! All SQL is runtime-checked (`sqlx::query`, not `sqlx::query!`) to avoid a
//! compile-time database requirement. MySQL binds don't expand array values,
//! so `IN (...)` lists are built with the [`placeholders`] helper and bound
//! one value at a time.

use async_trait::async_trait;
use portal_types::{
    AtcRow, AttributeRow, AttributeTable, Concept, ConceptType, Cui, EpcRow, LabelStatsRow,
    MoaRow, PeRow, Pmid, PkRow, StudySummary, TypePopulation,
};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use crate::error::QueryResult;
use crate::source::PortalSource;

/// Builds a `?,?,...,?` list for an `IN (...)` clause with `n` values.
fn placeholders(n: usize) -> String {
    let mut out = String::with_capacity(n * 2);
    for i in 0..n {
        if i > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

/// MySQL-backed portal data source.
///
/// Wraps a shared [`MySqlPool`]; the pool's lifecycle (sizing, acquisition,
/// timeouts) is owned by the hosting service, not by this type.
#[derive(Clone)]
pub struct MySqlSource {
    pool: MySqlPool,
}

impl MySqlSource {
    /// Creates a source over an existing pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn map_attribute_row(table: AttributeTable, row: &MySqlRow) -> Result<AttributeRow, sqlx::Error> {
        Ok(match table {
            AttributeTable::Atc => AttributeRow::Atc(AtcRow {
                cui: row.try_get("CUI")?,
                l1: row.try_get("L1")?,
                l2: row.try_get("L2")?,
                l3: row.try_get("L3")?,
                l4: row.try_get("L4")?,
                atc_code: row.try_get("atc_code")?,
            }),
            AttributeTable::Epc => AttributeRow::Epc(EpcRow {
                cui: row.try_get("CUI")?,
                epc: row.try_get("EPC")?,
            }),
            AttributeTable::Moa => AttributeRow::Moa(MoaRow {
                cui: row.try_get("CUI")?,
                moa: row.try_get("MOA")?,
            }),
            AttributeTable::Pe => AttributeRow::Pe(PeRow {
                cui: row.try_get("CUI")?,
                pe: row.try_get("PE")?,
            }),
            AttributeTable::Pk => AttributeRow::Pk(PkRow {
                cui: row.try_get("CUI")?,
                property: row.try_get("property")?,
                description: row.try_get("description")?,
            }),
            AttributeTable::LabelStats => AttributeRow::LabelStats(LabelStatsRow {
                cui: row.try_get("CUI")?,
                title: row.try_get("TITLE")?,
                nursing_mothers: row.try_get("nursing_mothers")?,
                carcinogenesis_and_mutagenesis_and_impairment_of_fertility: row
                    .try_get("carcinogenesis_and_mutagenesis_and_impairment_of_fertility")?,
                pregnancy: row.try_get("pregnancy")?,
                pediatric_use: row.try_get("pediatric_use")?,
                teratogenic_effects: row.try_get("teratogenic_effects")?,
                pregnancy_or_breast_feeding: row.try_get("pregnancy_or_breast_feeding")?,
                labor_and_delivery: row.try_get("labor_and_delivery")?,
                nonteratogenic_effects: row.try_get("nonteratogenic_effects")?,
            }),
        })
    }

    fn attribute_select(table: AttributeTable, cui_count: usize) -> String {
        // Explicit column lists: the surrogate id column never leaves the store.
        let columns = match table {
            AttributeTable::Atc => "CUI, L1, L2, L3, L4, atc_code",
            AttributeTable::Epc => "CUI, EPC",
            AttributeTable::Moa => "CUI, MOA",
            AttributeTable::Pe => "CUI, PE",
            AttributeTable::Pk => "CUI, property, description",
            AttributeTable::LabelStats => {
                "CUI, TITLE, nursing_mothers, \
                 carcinogenesis_and_mutagenesis_and_impairment_of_fertility, pregnancy, \
                 pediatric_use, teratogenic_effects, pregnancy_or_breast_feeding, \
                 labor_and_delivery, nonteratogenic_effects"
            }
        };
        format!(
            "SELECT {columns} FROM `{table}` WHERE CUI IN ({marks})",
            table = table.table_name(),
            marks = placeholders(cui_count),
        )
    }

    async fn distinct_pmids(&self, sql: &str, cuis: &[Cui]) -> QueryResult<Vec<Pmid>> {
        let mut query = sqlx::query(sql);
        for cui in cuis {
            query = query.bind(cui);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| Ok(row.try_get::<String, _>("pmid")?))
            .collect()
    }
}

#[async_trait]
impl PortalSource for MySqlSource {
    async fn concepts_by_name(&self, name: &str) -> QueryResult<Vec<Concept>> {
        let rows = sqlx::query("SELECT DISTINCT cui, type FROM concept WHERE name = ?")
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let cui: String = row.try_get("cui")?;
                let raw_type: String = row.try_get("type")?;
                Ok(Concept::new(cui, ConceptType::from_db_str(&raw_type)))
            })
            .collect()
    }

    async fn disease_children(&self, cuis: &[Cui]) -> QueryResult<Vec<Cui>> {
        if cuis.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT DISTINCT r.cui2 AS cui FROM rel r WHERE r.cui1 IN ({})",
            placeholders(cuis.len()),
        );
        let mut query = sqlx::query(&sql);
        for cui in cuis {
            query = query.bind(cui);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| Ok(row.try_get::<String, _>("cui")?))
            .collect()
    }

    async fn attribute_rows(
        &self,
        table: AttributeTable,
        cuis: &[Cui],
    ) -> QueryResult<Vec<AttributeRow>> {
        let sql = Self::attribute_select(table, cuis.len());
        let mut query = sqlx::query(&sql);
        for cui in cuis {
            query = query.bind(cui);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| Ok(Self::map_attribute_row(table, row)?))
            .collect()
    }

    async fn pmids_for_drugs(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>> {
        let sql = format!(
            "SELECT DISTINCT pmid FROM new_pmid2drug WHERE cui IN ({})",
            placeholders(cuis.len()),
        );
        self.distinct_pmids(&sql, cuis).await
    }

    async fn pmids_for_diseases(&self, cuis: &[Cui]) -> QueryResult<Vec<Pmid>> {
        let sql = format!(
            "SELECT DISTINCT pmid FROM new_pmid2disease WHERE cui IN ({})",
            placeholders(cuis.len()),
        );
        self.distinct_pmids(&sql, cuis).await
    }

    async fn pmids_for_drugs_and_diseases(
        &self,
        drug_cuis: &[Cui],
        disease_cuis: &[Cui],
    ) -> QueryResult<Vec<Pmid>> {
        // A PMID qualifies only if it has at least one matching drug CUI AND
        // at least one matching disease CUI.
        let sql = format!(
            "SELECT DISTINCT d.pmid \
             FROM new_pmid2drug AS d \
             JOIN new_pmid2disease AS dis ON dis.pmid = d.pmid \
             WHERE d.cui IN ({}) AND dis.cui IN ({})",
            placeholders(drug_cuis.len()),
            placeholders(disease_cuis.len()),
        );
        let mut query = sqlx::query(&sql);
        for cui in drug_cuis {
            query = query.bind(cui);
        }
        for cui in disease_cuis {
            query = query.bind(cui);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| Ok(row.try_get::<String, _>("pmid")?))
            .collect()
    }

    async fn study_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<StudySummary>> {
        let sql = format!(
            "SELECT p.pmid AS PMID, \
                    MAX(p.title) AS Title, \
                    p.pubdate AS Year, \
                    GROUP_CONCAT(DISTINCT pd.text SEPARATOR ' / ') AS StudiedDrugs, \
                    GROUP_CONCAT(DISTINCT CASE \
                      WHEN pd2.text != 'NA' AND pd2.text IS NOT NULL THEN pd2.text \
                    END SEPARATOR ' / ') AS StudiedDiseases \
             FROM new_pubmed_records p \
             LEFT JOIN new_pmid2drug pd ON p.pmid = pd.pmid \
             LEFT JOIN new_pmid2disease pd2 ON p.pmid = pd2.pmid \
             WHERE p.pmid IN ({}) \
             GROUP BY p.pmid",
            placeholders(pmids.len()),
        );
        let mut query = sqlx::query(&sql);
        for pmid in pmids {
            query = query.bind(pmid);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| {
                Ok(StudySummary {
                    pmid: row.try_get("PMID")?,
                    title: row.try_get("Title")?,
                    year: row.try_get("Year")?,
                    studied_drugs: row.try_get("StudiedDrugs")?,
                    studied_diseases: row.try_get("StudiedDiseases")?,
                })
            })
            .collect()
    }

    async fn type_population_rows(&self, pmids: &[Pmid]) -> QueryResult<Vec<TypePopulation>> {
        let sql = format!(
            "SELECT st.pmid, \
                    GROUP_CONCAT(DISTINCT st.type SEPARATOR ' / ') AS study_type, \
                    GROUP_CONCAT(DISTINCT pop.type SEPARATOR ' / ') AS population \
             FROM new_study_type st \
             LEFT JOIN new_population pop ON st.pmid = pop.pmid \
             WHERE st.pmid IN ({}) \
             GROUP BY st.pmid",
            placeholders(pmids.len()),
        );
        let mut query = sqlx::query(&sql);
        for pmid in pmids {
            query = query.bind(pmid);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| {
                let study_type: Option<String> = row.try_get("study_type")?;
                Ok(TypePopulation {
                    pmid: row.try_get("pmid")?,
                    study_type: study_type.unwrap_or_default(),
                    population: row.try_get("population")?,
                })
            })
            .collect()
    }
}
