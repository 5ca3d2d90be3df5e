//! Placeholder values written into records instead of raising.
//!
//! The documents are Spanish, and so are the placeholders that end up in
//! the consolidated sheet.

/// No rule matched the field.
pub const NOT_FOUND: &str = "No encontrado";

/// The document's text could not be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// A date-shaped match was found but is not a calendar date.
pub const DATE_FORMAT_ERROR: &str = "Error de Formato";

/// No secondary document was merged into the row.
pub const NO_SECONDARY: &str = "Sin cotización";

/// Every placeholder value.
pub const ALL: [&str; 4] = [NOT_FOUND, NOT_AVAILABLE, DATE_FORMAT_ERROR, NO_SECONDARY];

/// Check whether a value is one of the placeholders.
pub fn is_sentinel(value: &str) -> bool {
    ALL.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("N/A"));
        assert!(is_sentinel("No encontrado"));
        assert!(!is_sentinel("ACME S.A."));
        assert!(!is_sentinel(""));
    }
}
