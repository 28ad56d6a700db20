//! # portal-query
//!
//! Query layer of the Silver knowledge portal: resolves drug and disease
//! names to controlled-vocabulary concepts, fetches per-drug attributes, and
//! aggregates the PubMed literature behind a concept set.
//!
//! All table access goes through the [`PortalSource`] trait. Production code
//! injects the [`MySqlSource`] over a connection pool; tests and local
//! development use the in-memory [`MemorySource`].
//!
//! ## Usage
//!
//! ```rust
//! use portal_query::{resolve_concepts, resolve_pmids, ConceptQuery, MemorySource};
//! use portal_types::{Concept, SearchField, SearchType};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), portal_query::QueryError> {
//! let mut source = MemorySource::new();
//! source.insert_concept("aspirin", Concept::drug("C0004057"));
//! source.insert_drug_link("31712345", "C0004057", Some("aspirin"));
//!
//! let query = ConceptQuery::from_input(Some("aspirin"), None);
//! let concepts = resolve_concepts(&source, &query).await?;
//! let pmids = resolve_pmids(&source, &concepts, &SearchType::from(SearchField::Drug)).await?;
//! assert_eq!(pmids, vec!["31712345".to_string()]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod attributes;
mod concepts;
mod error;
mod memory;
mod mysql;
mod pmids;
mod source;
mod studies;

// Re-export portal-types for convenience
pub use portal_types;

pub use attributes::fetch_attributes;
pub use concepts::{resolve_concepts, ConceptQuery};
pub use error::{QueryError, QueryResult};
pub use memory::{MemorySource, Publication};
pub use mysql::MySqlSource;
pub use pmids::resolve_pmids;
pub use source::PortalSource;
pub use studies::{aggregate_studies, aggregate_type_population, STUDY_BATCH_SIZE};
