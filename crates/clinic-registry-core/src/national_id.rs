//! National-ID validation and display formatting.
//!
//! Format-only validation: separators are stripped and the remaining text
//! must be exactly 11 digits. No check-digit verification.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a canonical national ID.
pub const NATIONAL_ID_DIGITS: usize = 11;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("valid regex"));

/// Rejected national-ID input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("the national ID must contain exactly 11 digits (separators are allowed)")]
pub struct InvalidNationalId;

/// A national ID in canonical digits-only form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NationalId(String);

impl NationalId {
    /// Parse raw user input, ignoring any separator characters.
    pub fn parse(raw: &str) -> Result<Self, InvalidNationalId> {
        let digits = strip_non_digits(raw);
        if digits.len() == NATIONAL_ID_DIGITS {
            Ok(Self(digits))
        } else {
            Err(InvalidNationalId)
        }
    }

    /// Canonical digits-only form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with the fixed grouping punctuation.
    pub fn formatted(&self) -> String {
        format_national_id(&self.0)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remove every non-digit character from `raw`.
pub fn strip_non_digits(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

/// Apply the XXX.XXX.XXX-XX display mask to a canonical 11-digit ID.
///
/// Anything else is returned unchanged rather than rejected, so stored
/// values always have a printable form.
pub fn format_national_id(id: &str) -> String {
    if id.len() == NATIONAL_ID_DIGITS && id.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}.{}.{}-{}", &id[..3], &id[3..6], &id[6..9], &id[9..])
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain_digits() {
        let id = NationalId::parse("12345678901").unwrap();
        assert_eq!(id.as_str(), "12345678901");
    }

    #[test]
    fn test_parse_formatted_input() {
        let id = NationalId::parse("123.456.789-01").unwrap();
        assert_eq!(id.as_str(), "12345678901");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(NationalId::parse("123").is_err());
        assert!(NationalId::parse("123456789012").is_err());
        assert!(NationalId::parse("").is_err());
    }

    #[test]
    fn test_parse_counts_digits_only() {
        // Ten digits plus a letter is still ten digits
        assert!(NationalId::parse("123456789a1").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_national_id("12345678901"), "123.456.789-01");
    }

    #[test]
    fn test_format_passthrough() {
        assert_eq!(format_national_id("123"), "123");
        assert_eq!(format_national_id("123456789012"), "123456789012");
        assert_eq!(format_national_id(""), "");
        assert_eq!(format_national_id("1234567890a"), "1234567890a");
    }

    #[test]
    fn test_formatted_roundtrip() {
        let id = NationalId::parse("123.456.789-01").unwrap();
        assert_eq!(id.formatted(), "123.456.789-01");
        assert_eq!(id.to_string(), "12345678901");
    }

    proptest! {
        #[test]
        fn parse_succeeds_iff_eleven_digits_remain(raw in ".*") {
            let digits = strip_non_digits(&raw);
            match NationalId::parse(&raw) {
                Ok(id) => {
                    prop_assert_eq!(digits.len(), NATIONAL_ID_DIGITS);
                    prop_assert_eq!(id.as_str(), digits.as_str());
                }
                Err(_) => prop_assert_ne!(digits.len(), NATIONAL_ID_DIGITS),
            }
        }

        #[test]
        fn format_is_pure_passthrough_for_other_lengths(s in "[0-9]{0,10}|[0-9]{12,16}") {
            prop_assert_eq!(format_national_id(&s), s.clone());
        }
    }
}
