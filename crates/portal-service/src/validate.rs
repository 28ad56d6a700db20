//! Request input validation.
//!
//! Every user-supplied value is checked before it reaches the query layer:
//! length and character-set limits on free-text names, strict format checks
//! on CUIs and PMIDs, and a coarse SQL-keyword screen on anything that ends
//! up inside a query. Failures map to 400 responses.

use std::sync::OnceLock;

use portal_types::{is_valid_cui, is_valid_pmid, Concept};
use regex::Regex;

/// Maximum accepted length for a free-text search name.
pub const MAX_STRING_LENGTH: usize = 1000;

/// Maximum accepted length for a request-body array.
pub const MAX_ARRAY_LENGTH: usize = 1000;

fn allowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^[a-zA-Z0-9\s\-_.,()\[\]{}":;@#$%^&*+=<>?/\\|~`!]+$"#)
            .expect("hardcoded charset pattern compiles")
    })
}

fn sql_patterns() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?i)\b(union|select|insert|update|delete|drop|create|alter|exec|execute)\b",
            r"(?i)\b(or|and)\b\s+\d+\s*[=<>]",
            r"(--|/\*|\*/)",
            r"(?i)\b(xp_|sp_|fn_)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("hardcoded sql pattern compiles"))
        .collect()
    })
}

/// Returns true if the input matches a known SQL-injection shape.
pub fn looks_like_sql(input: &str) -> bool {
    sql_patterns().iter().any(|p| p.is_match(input))
}

/// Validates a free-text search name.
pub fn validate_name(value: &str, field: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must be a non-empty string"));
    }
    if value.len() > MAX_STRING_LENGTH {
        return Err(format!(
            "{field} exceeds maximum length of {MAX_STRING_LENGTH}"
        ));
    }
    if !allowed_chars().is_match(value) {
        return Err(format!("{field} contains invalid characters"));
    }
    if looks_like_sql(value) {
        return Err(format!("{field} contains a disallowed pattern"));
    }
    Ok(())
}

/// Validates a request-body list of concepts: array bound plus per-item CUI
/// format.
pub fn validate_concepts<'a, I>(concepts: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a Concept>,
{
    let mut count = 0;
    for concept in concepts {
        count += 1;
        if count > MAX_ARRAY_LENGTH {
            return Err(format!(
                "conceptIds array exceeds maximum length of {MAX_ARRAY_LENGTH}"
            ));
        }
        if !is_valid_cui(&concept.cui) {
            return Err("CUI must be in format C followed by 7 digits".to_string());
        }
    }
    Ok(())
}

/// Validates a request-body list of PMIDs.
pub fn validate_pmids<'a, I>(pmids: I) -> Result<(), String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut count = 0;
    for pmid in pmids {
        count += 1;
        if count > MAX_ARRAY_LENGTH {
            return Err(format!(
                "pmids array exceeds maximum length of {MAX_ARRAY_LENGTH}"
            ));
        }
        if !is_valid_pmid(pmid) {
            return Err("PMID must be a 1-8 digit number".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass() {
        assert!(validate_name("aspirin", "drug").is_ok());
        assert!(validate_name("type 2 diabetes mellitus", "disease").is_ok());
        assert!(validate_name("1,25-dihydroxyvitamin D3", "drug").is_ok());
    }

    #[test]
    fn test_length_bound() {
        let long = "a".repeat(MAX_STRING_LENGTH + 1);
        assert!(validate_name(&long, "drug").is_err());
        let max = "a".repeat(MAX_STRING_LENGTH);
        assert!(validate_name(&max, "drug").is_ok());
    }

    #[test]
    fn test_charset_rejects_control_and_unicode() {
        assert!(validate_name("aspirin\u{0}", "drug").is_err());
        assert!(validate_name("αspirin", "drug").is_err());
        assert!(validate_name("", "drug").is_err());
    }

    #[test]
    fn test_sql_shapes_rejected() {
        assert!(looks_like_sql("1 UNION SELECT * FROM users"));
        assert!(looks_like_sql("x'; DROP table concept"));
        assert!(looks_like_sql("a -- comment"));
        assert!(looks_like_sql("or 1=1"));
        // Substrings of ordinary words don't trip the keyword screen
        assert!(!looks_like_sql("selected population"));
        assert!(!looks_like_sql("aspirin"));
    }

    #[test]
    fn test_cui_and_pmid_formats() {
        let good = Concept::drug("C0004057");
        assert!(validate_concepts(std::iter::once(&good)).is_ok());

        let bad = Concept::drug("X0004057");
        assert!(validate_concepts(std::iter::once(&bad)).is_err());

        assert!(validate_pmids(["31712345"].into_iter()).is_ok());
        assert!(validate_pmids(["123456789"].into_iter()).is_err());
        assert!(validate_pmids(["12ab"].into_iter()).is_err());
    }

    #[test]
    fn test_array_bound() {
        let pmids: Vec<String> = (0..=MAX_ARRAY_LENGTH).map(|n| n.to_string()).collect();
        assert!(validate_pmids(pmids.iter().map(String::as_str)).is_err());
    }
}
