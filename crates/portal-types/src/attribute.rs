//! Per-drug classification (attribute) tables and row shapes.
//!
//! Each supported table has its own row schema; the surrogate id column each
//! table carries (`atcid`, `epcid`, ...) is never part of the row type, so
//! rows that differ only by that id compare equal and collapse during dedup.

/// A named drug-attribute table.
///
/// # Examples
///
/// ```
/// use portal_types::AttributeTable;
///
/// let table = AttributeTable::from_name("atc").unwrap();
/// assert_eq!(table.table_name(), "atc");
/// assert_eq!(table.id_column(), Some("atcid"));
/// assert_eq!(AttributeTable::LabelStats.id_column(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttributeTable {
    /// Anatomical-therapeutic-chemical classification.
    Atc,
    /// Established pharmacologic class.
    Epc,
    /// Mechanism of action.
    Moa,
    /// Physiologic effect.
    Pe,
    /// Pharmacokinetics.
    Pk,
    /// Drug-label section statistics.
    LabelStats,
}

impl AttributeTable {
    /// All supported tables.
    pub const ALL: [AttributeTable; 6] = [
        Self::Atc,
        Self::Epc,
        Self::Moa,
        Self::Pe,
        Self::Pk,
        Self::LabelStats,
    ];

    /// Returns the table name as it appears in the store.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Atc => "atc",
            Self::Epc => "epc",
            Self::Moa => "moa",
            Self::Pe => "pe",
            Self::Pk => "pk",
            Self::LabelStats => "label_stats",
        }
    }

    /// Returns the surrogate id column excluded from returned rows, if any.
    pub fn id_column(self) -> Option<&'static str> {
        match self {
            Self::Atc => Some("atcid"),
            Self::Epc => Some("epcid"),
            Self::Moa => Some("moaid"),
            Self::Pe => Some("peid"),
            Self::Pk => Some("pkid"),
            Self::LabelStats => None,
        }
    }

    /// Looks up a table by name.
    ///
    /// Returns `None` for unknown names; the HTTP layer maps that to a 404.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "atc" => Some(Self::Atc),
            "epc" => Some(Self::Epc),
            "moa" => Some(Self::Moa),
            "pe" => Some(Self::Pe),
            "pk" => Some(Self::Pk),
            "label_stats" => Some(Self::LabelStats),
            _ => None,
        }
    }
}

/// One row of the `atc` table: the four ATC hierarchy levels plus the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtcRow {
    /// The drug concept this classification belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// Level-1 (anatomical main group) label.
    #[cfg_attr(feature = "serde", serde(rename = "L1"))]
    pub l1: String,
    /// Level-2 (therapeutic subgroup) label.
    #[cfg_attr(feature = "serde", serde(rename = "L2"))]
    pub l2: String,
    /// Level-3 (pharmacological subgroup) label.
    #[cfg_attr(feature = "serde", serde(rename = "L3"))]
    pub l3: String,
    /// Level-4 (chemical subgroup) label.
    #[cfg_attr(feature = "serde", serde(rename = "L4"))]
    pub l4: String,
    /// The full ATC code.
    pub atc_code: String,
}

/// One row of the `epc` table: an established pharmacologic class term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpcRow {
    /// The drug concept this class belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// The class term.
    #[cfg_attr(feature = "serde", serde(rename = "EPC"))]
    pub epc: String,
}

/// One row of the `moa` table: a mechanism-of-action term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoaRow {
    /// The drug concept this mechanism belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// The mechanism term.
    #[cfg_attr(feature = "serde", serde(rename = "MOA"))]
    pub moa: String,
}

/// One row of the `pe` table: a physiologic-effect term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeRow {
    /// The drug concept this effect belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// The effect term.
    #[cfg_attr(feature = "serde", serde(rename = "PE"))]
    pub pe: String,
}

/// One row of the `pk` table: a pharmacokinetic property and its description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PkRow {
    /// The drug concept this property belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// The property name (e.g. half-life, clearance).
    pub property: String,
    /// The property description.
    pub description: String,
}

/// One row of the `label_stats` table: which special-population sections a
/// drug's label carries (flags are 0/1 in the store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct LabelStatsRow {
    /// The drug concept this label belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "CUI"))]
    pub cui: String,
    /// The label title.
    #[cfg_attr(feature = "serde", serde(rename = "TITLE"))]
    pub title: String,
    pub nursing_mothers: i8,
    pub carcinogenesis_and_mutagenesis_and_impairment_of_fertility: i8,
    pub pregnancy: i8,
    pub pediatric_use: i8,
    pub teratogenic_effects: i8,
    pub pregnancy_or_breast_feeding: i8,
    pub labor_and_delivery: i8,
    pub nonteratogenic_effects: i8,
}

/// One row of any attribute table, tagged by table.
///
/// Serializes untagged so the wire shape is the bare row object the frontend
/// expects. Rows derive `Eq`/`Hash`, so value-equality dedup on this type is
/// equivalent to deduplicating the original rows after dropping the id column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttributeRow {
    /// A row from `atc`.
    Atc(AtcRow),
    /// A row from `epc`.
    Epc(EpcRow),
    /// A row from `moa`.
    Moa(MoaRow),
    /// A row from `pe`.
    Pe(PeRow),
    /// A row from `pk`.
    Pk(PkRow),
    /// A row from `label_stats`.
    LabelStats(LabelStatsRow),
}

impl AttributeRow {
    /// Returns the table this row came from.
    pub fn table(&self) -> AttributeTable {
        match self {
            Self::Atc(_) => AttributeTable::Atc,
            Self::Epc(_) => AttributeTable::Epc,
            Self::Moa(_) => AttributeTable::Moa,
            Self::Pe(_) => AttributeTable::Pe,
            Self::Pk(_) => AttributeTable::Pk,
            Self::LabelStats(_) => AttributeTable::LabelStats,
        }
    }

    /// Returns the row's CUI.
    pub fn cui(&self) -> &str {
        match self {
            Self::Atc(r) => &r.cui,
            Self::Epc(r) => &r.cui,
            Self::Moa(r) => &r.cui,
            Self::Pe(r) => &r.cui,
            Self::Pk(r) => &r.cui,
            Self::LabelStats(r) => &r.cui,
        }
    }
}
