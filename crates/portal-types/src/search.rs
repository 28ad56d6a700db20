//! Search-type selector for PMID resolution.

/// A single searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchField {
    /// The drug-name search box.
    Drug,
    /// The disease-name search box.
    Disease,
}

/// Which of the drug/disease search fields a request used.
///
/// The wire format is either a single field name or a list of field names,
/// so this is an untagged union of both shapes:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use portal_types::SearchType;
///
/// let one: SearchType = serde_json::from_str(r#""Drug""#).unwrap();
/// assert!(one.includes_drug());
///
/// let both: SearchType = serde_json::from_str(r#"["Drug","Disease"]"#).unwrap();
/// assert!(both.includes_drug() && both.includes_disease());
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SearchType {
    /// A single search field.
    One(SearchField),
    /// A list of search fields (either or both).
    Many(Vec<SearchField>),
}

impl SearchType {
    /// Returns true if the drug field was searched.
    pub fn includes_drug(&self) -> bool {
        self.includes(SearchField::Drug)
    }

    /// Returns true if the disease field was searched.
    pub fn includes_disease(&self) -> bool {
        self.includes(SearchField::Disease)
    }

    fn includes(&self, field: SearchField) -> bool {
        match self {
            Self::One(f) => *f == field,
            Self::Many(fields) => fields.contains(&field),
        }
    }
}

impl From<SearchField> for SearchType {
    fn from(field: SearchField) -> Self {
        Self::One(field)
    }
}

impl From<Vec<SearchField>> for SearchType {
    fn from(fields: Vec<SearchField>) -> Self {
        Self::Many(fields)
    }
}
