//! Property tests for free-text normalization.

use proptest::prelude::*;
use spayd_core::normalization::{escape_text, is_escaped, normalize_text, transliterate_text};

/// Undo the escaping performed by `escape_text`.
fn unescape(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let hex = std::str::from_utf8(&bytes[idx + 1..idx + 3]).expect("ascii hex");
            out.push(u8::from_str_radix(hex, 16).expect("hex byte"));
            idx += 3;
        } else {
            out.push(bytes[idx]);
            idx += 1;
        }
    }
    String::from_utf8(out).expect("utf-8")
}

#[test]
fn escaping_examples() {
    assert_eq!(normalize_text("Příliš žluťoučký kůň", true), "PRILIS ZLUTOUCKY KUN");
    assert_eq!(normalize_text("Zaplaceno 100%", false), "Zaplaceno 100%25");
    assert_eq!(transliterate_text("ÄÖÜ äöü"), "AOU AOU");
}

proptest! {
    #[test]
    fn output_is_always_safe(text in any::<String>(), transliterate in any::<bool>()) {
        let normalized = normalize_text(&text, transliterate);
        prop_assert!(normalized.is_ascii());
        prop_assert!(!normalized.contains('*'));
        prop_assert!(!normalized.contains('+'));
    }

    #[test]
    fn escaped_text_is_a_fixed_point(text in "[ -$&-),-~]*") {
        // The class excludes '*', '+' and '%'.
        prop_assert!(is_escaped(&text));
        prop_assert_eq!(escape_text(&text), text.clone());
        prop_assert_eq!(normalize_text(&text, false), text);
    }

    #[test]
    fn escaping_is_reversible(text in any::<String>()) {
        prop_assert_eq!(unescape(&escape_text(&text)), text);
    }

    #[test]
    fn reserved_characters_only_appear_escaped(text in "[a-z*+% ]{0,40}") {
        let escaped = escape_text(&text);
        prop_assert_eq!(escaped.matches("%2A").count(), text.matches('*').count());
        prop_assert_eq!(escaped.matches("%2B").count(), text.matches('+').count());
        prop_assert_eq!(escaped.matches("%25").count(), text.matches('%').count());
        prop_assert_eq!(escaped.matches('%').count(), text.chars().filter(|c| matches!(c, '*' | '+' | '%')).count());
    }

    #[test]
    fn transliteration_is_idempotent(text in "[a-zA-ZáčďéěíňóřšťúůýžÁČĎÉĚÍŇÓŘŠŤÚŮÝŽ ]{0,40}") {
        let once = transliterate_text(&text);
        prop_assert_eq!(transliterate_text(&once), once.clone());
        prop_assert!(once.is_ascii());
    }
}
