//! Per-PMID study aggregates.

use crate::Pmid;

/// Separator used when the aggregation layer joins distinct names into a
/// single field (e.g. `"aspirin / warfarin"`).
pub const LIST_SEPARATOR: &str = " / ";

/// Splits a joined multi-valued field back into its parts.
///
/// `None` and empty strings yield an empty list.
///
/// # Examples
///
/// ```
/// use portal_types::split_list;
///
/// assert_eq!(split_list(Some("aspirin / warfarin")), vec!["aspirin", "warfarin"]);
/// assert!(split_list(None).is_empty());
/// ```
pub fn split_list(joined: Option<&str>) -> Vec<String> {
    match joined {
        Some(s) if !s.is_empty() => s.split(LIST_SEPARATOR).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// One summarized publication row.
///
/// `studied_drugs` / `studied_diseases` are the distinct matched mention
/// names joined with [`LIST_SEPARATOR`]. A publication with no surviving
/// disease mentions carries `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudySummary {
    /// The publication identifier.
    #[cfg_attr(feature = "serde", serde(rename = "PMID"))]
    pub pmid: Pmid,
    /// The publication title.
    #[cfg_attr(feature = "serde", serde(rename = "Title"))]
    pub title: Option<String>,
    /// The publication year.
    #[cfg_attr(feature = "serde", serde(rename = "Year"))]
    pub year: Option<String>,
    /// Distinct drug mention names, joined.
    #[cfg_attr(feature = "serde", serde(rename = "StudiedDrugs"))]
    pub studied_drugs: Option<String>,
    /// Distinct disease mention names, joined. `"NA"` and NULL mentions are
    /// excluded by the aggregation.
    #[cfg_attr(feature = "serde", serde(rename = "StudiedDiseases"))]
    pub studied_diseases: Option<String>,
}

/// Per-PMID study-type and population aggregate.
///
/// A PMID with study-type records but no population records still appears,
/// with `population` set to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypePopulation {
    /// The publication identifier.
    pub pmid: Pmid,
    /// Distinct study-type labels, joined.
    pub study_type: String,
    /// Distinct population labels, joined, if any.
    pub population: Option<String>,
}
