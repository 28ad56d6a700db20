//! Concept Unique Identifier (CUI) type.
//!
//! CUIs are the stable external keys identifying drug and disease concepts
//! in the portal's controlled vocabulary.

/// A Concept Unique Identifier (CUI).
///
/// CUIs are strings of the form `C` followed by seven decimal digits,
/// e.g. `C0004057` (aspirin). The core treats them as opaque keys; use
/// [`is_valid_cui`] to check the format at the input boundary.
///
/// # Examples
///
/// ```
/// use portal_types::Cui;
///
/// let aspirin: Cui = "C0004057".to_string();
/// let diabetes: Cui = "C0011849".to_string();
/// ```
pub type Cui = String;

/// Returns true if `value` is a well-formed CUI (`C` + 7 digits).
///
/// # Examples
///
/// ```
/// use portal_types::is_valid_cui;
///
/// assert!(is_valid_cui("C0004057"));
/// assert!(!is_valid_cui("c0004057"));
/// assert!(!is_valid_cui("C123"));
/// ```
pub fn is_valid_cui(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 8 && bytes[0] == b'C' && bytes[1..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cui() {
        assert!(is_valid_cui("C0000000"));
        assert!(is_valid_cui("C9999999"));
    }

    #[test]
    fn test_invalid_cui() {
        assert!(!is_valid_cui(""));
        assert!(!is_valid_cui("C000000"));
        assert!(!is_valid_cui("C00000000"));
        assert!(!is_valid_cui("D0004057"));
        assert!(!is_valid_cui("C00O4057"));
    }
}
