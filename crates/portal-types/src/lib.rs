//! # portal-types
//!
//! Type definitions for the Silver knowledge-portal query layer.
//!
//! This crate provides the value types shared by the query core and the HTTP
//! service: controlled-vocabulary concepts (CUI + type), ordered concept sets,
//! publication identifiers (PMIDs), the per-table drug-attribute row shapes,
//! and the per-PMID study aggregates.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use portal_types::{Concept, ConceptSet, ConceptType};
//!
//! let mut set = ConceptSet::new();
//! set.insert(Concept::new("C0004057", ConceptType::Drug));
//! set.insert(Concept::new("C0004057", ConceptType::Drug)); // deduped
//!
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.drug_cuis(), vec!["C0004057"]);
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! portal-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod attribute;
mod concept;
mod concept_set;
mod cui;
mod pmid;
mod search;
mod study;

pub use attribute::{
    AtcRow, AttributeRow, AttributeTable, EpcRow, LabelStatsRow, MoaRow, PeRow, PkRow,
};
pub use concept::{Concept, ConceptType};
pub use concept_set::ConceptSet;
pub use cui::{is_valid_cui, Cui};
pub use pmid::{is_valid_pmid, Pmid};
pub use search::{SearchField, SearchType};
pub use study::{split_list, StudySummary, TypePopulation, LIST_SEPARATOR};
