//! Text normalization for free-text descriptor values.
//!
//! Values such as the recipient name or the message are user text and may
//! contain characters that break the `*`-delimited format. Normalization:
//!
//! 1. Optionally transliterates: uppercase, canonical decomposition (NFD),
//!    then removal of combining diacritical marks (U+0300..=U+036F).
//! 2. Always escapes:
//!    - non-ASCII characters are percent-encoded as UTF-8 (`Ř` -> `%C5%98`)
//!    - `*` -> `%2A` (attribute delimiter)
//!    - `+` -> `%2B` (account/BIC separator)
//!    - `%` -> `%25` (escape character)
//!
//! Normalization never fails; every input maps to an escaped output.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalize a free-text value for inclusion in a descriptor.
///
/// # Example
/// ```
/// use spayd_core::normalization::normalize_text;
///
/// assert_eq!(normalize_text("Petr Dvořák", true), "PETR DVORAK");
/// assert_eq!(normalize_text("50% *sale*", false), "50%25 %2Asale%2A");
/// ```
pub fn normalize_text(text: &str, transliterate: bool) -> String {
    if transliterate {
        escape_text(&transliterate_text(text))
    } else {
        escape_text(text)
    }
}

/// Uppercase and strip diacritics, leaving base letters.
pub fn transliterate_text(text: &str) -> String {
    text.to_uppercase()
        .nfd()
        .filter(|ch| !COMBINING_MARKS.contains(ch))
        .collect()
}

/// Escape characters that are unsafe inside a descriptor value.
pub fn escape_text(text: &str) -> String {
    if is_escaped(text) {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        match ch {
            '*' => out.push_str("%2A"),
            '+' => out.push_str("%2B"),
            '%' => out.push_str("%25"),
            c if c.is_ascii() => out.push(c),
            c => out.extend(utf8_percent_encode(c.encode_utf8(&mut buf), NON_ALPHANUMERIC)),
        }
    }
    out
}

/// Returns true if `text` would pass through [`escape_text`] unchanged.
pub fn is_escaped(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_ascii() && !matches!(ch, '*' | '+' | '%'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_passes_through() {
        assert_eq!(escape_text("PLATBA ZA ZBOZI"), "PLATBA ZA ZBOZI");
        assert_eq!(escape_text("a-b_c.d~e:f/g?h=i&j"), "a-b_c.d~e:f/g?h=i&j");
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(escape_text("*"), "%2A");
        assert_eq!(escape_text("+"), "%2B");
        assert_eq!(escape_text("%"), "%25");
        assert_eq!(escape_text("1+1*2=4%"), "1%2B1%2A2=4%25");
    }

    #[test]
    fn test_non_ascii_is_percent_encoded() {
        assert_eq!(escape_text("ř"), "%C5%99");
        assert_eq!(escape_text("Dvořák"), "Dvo%C5%99%C3%A1k");
        assert_eq!(escape_text("€"), "%E2%82%AC");
        assert_eq!(escape_text("😀"), "%F0%9F%98%80");
    }

    #[test]
    fn test_transliteration_strips_diacritics() {
        assert_eq!(transliterate_text("Petr Dvořák"), "PETR DVORAK");
        assert_eq!(transliterate_text("žluťoučký kůň"), "ZLUTOUCKY KUN");
        assert_eq!(transliterate_text("Payment for some stuff"), "PAYMENT FOR SOME STUFF");
    }

    #[test]
    fn test_transliteration_keeps_non_decomposable_letters() {
        // Ł has no canonical decomposition and is escaped afterwards.
        assert_eq!(normalize_text("Łódź", true), "%C5%81ODZ");
    }

    #[test]
    fn test_normalize_without_transliteration_keeps_case() {
        assert_eq!(normalize_text("Petr Dvořák", false), "Petr Dvo%C5%99%C3%A1k");
    }

    #[test]
    fn test_is_escaped() {
        assert!(is_escaped("PLATBA ZA ZBOZI"));
        assert!(!is_escaped("a*b"));
        assert!(!is_escaped("a%2Ab"));
        assert!(!is_escaped("č"));
    }
}
