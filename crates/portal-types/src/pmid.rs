//! PubMed identifier (PMID) type.

/// A PubMed identifier (PMID).
///
/// PMIDs are strings of one to eight decimal digits identifying a publication
/// record. The core never parses them further; they are compared and joined
/// as opaque keys.
///
/// # Examples
///
/// ```
/// use portal_types::Pmid;
///
/// let pmid: Pmid = "31712345".to_string();
/// ```
pub type Pmid = String;

/// Returns true if `value` is a well-formed PMID (1–8 decimal digits).
///
/// # Examples
///
/// ```
/// use portal_types::is_valid_pmid;
///
/// assert!(is_valid_pmid("1"));
/// assert!(is_valid_pmid("31712345"));
/// assert!(!is_valid_pmid("123456789"));
/// ```
pub fn is_valid_pmid(value: &str) -> bool {
    !value.is_empty() && value.len() <= 8 && value.bytes().all(|b| b.is_ascii_digit())
}
