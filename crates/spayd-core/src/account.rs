//! Account number validation for `ACC` and `ALT-ACC`.
//!
//! An account is either `IBAN` or `IBAN+BIC`. Only the IBAN part is checked; the
//! BIC must be present after the `+` but its format is not validated.
//!
//! IBAN checking sits behind [`IbanValidator`] so callers can plug in their own
//! implementation. [`Iso13616Validator`] is the default.

/// Checks whether a string is a valid IBAN in electronic format.
pub trait IbanValidator: Send + Sync {
    fn is_valid(&self, iban: &str) -> bool;
}

impl<F> IbanValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, iban: &str) -> bool {
        self(iban)
    }
}

/// BBAN structure per country (ISO 13616 registry), sorted by country code.
///
/// Registry notation: `4!n` is exactly four digits, `a` an uppercase letter and
/// `c` an uppercase letter or digit. The IBAN length is the BBAN length plus 4.
#[rustfmt::skip]
const BBAN_FORMATS: &[(&str, &str)] = &[
    ("AD", "4!n4!n12!c"), ("AE", "3!n16!n"), ("AL", "8!n16!c"), ("AT", "5!n11!n"),
    ("AZ", "4!a20!c"), ("BA", "3!n3!n8!n2!n"), ("BE", "3!n7!n2!n"), ("BG", "4!a4!n2!n8!c"),
    ("BH", "4!a14!c"), ("BI", "5!n5!n11!n2!n"), ("BR", "8!n5!n10!n1!a1!c"), ("BY", "4!c4!n16!c"),
    ("CH", "5!n12!c"), ("CR", "4!n14!n"), ("CY", "3!n5!n16!c"), ("CZ", "4!n6!n10!n"),
    ("DE", "8!n10!n"), ("DJ", "5!n5!n11!n2!n"), ("DK", "4!n9!n1!n"), ("DO", "4!c20!n"),
    ("EE", "2!n2!n11!n1!n"), ("EG", "4!n4!n17!n"), ("ES", "4!n4!n1!n1!n10!n"), ("FI", "3!n11!n"),
    ("FK", "2!a12!n"), ("FO", "4!n9!n1!n"), ("FR", "5!n5!n11!c2!n"), ("GB", "4!a6!n8!n"),
    ("GE", "2!a16!n"), ("GI", "4!a15!c"), ("GL", "4!n9!n1!n"), ("GR", "3!n4!n16!c"),
    ("GT", "4!c20!c"), ("HR", "7!n10!n"), ("HU", "3!n4!n1!n15!n1!n"), ("IE", "4!a6!n8!n"),
    ("IL", "3!n3!n13!n"), ("IQ", "4!a3!n12!n"), ("IS", "4!n2!n6!n10!n"), ("IT", "1!a5!n5!n12!c"),
    ("JO", "4!a4!n18!c"), ("KW", "4!a22!c"), ("KZ", "3!n13!c"), ("LB", "4!n20!c"),
    ("LC", "4!a24!c"), ("LI", "5!n12!c"), ("LT", "5!n11!n"), ("LU", "3!n13!c"), ("LV", "4!a13!c"),
    ("LY", "3!n3!n15!n"), ("MC", "5!n5!n11!c2!n"), ("MD", "2!c18!c"), ("ME", "3!n13!n2!n"),
    ("MK", "3!n10!c2!n"), ("MN", "4!n12!n"), ("MR", "5!n5!n11!n2!n"), ("MT", "4!a5!n18!c"),
    ("MU", "4!a2!n2!n12!n3!n3!a"), ("NI", "4!a20!n"), ("NL", "4!a10!n"), ("NO", "4!n6!n1!n"),
    ("OM", "3!n16!c"), ("PK", "4!a16!c"), ("PL", "8!n16!n"), ("PS", "4!a21!c"),
    ("PT", "4!n4!n11!n2!n"), ("QA", "4!a21!c"), ("RO", "4!a16!c"), ("RS", "3!n13!n2!n"),
    ("RU", "9!n5!n15!c"), ("SA", "2!n18!c"), ("SC", "4!a2!n2!n16!n3!a"), ("SD", "2!n12!n"),
    ("SE", "3!n16!n1!n"), ("SI", "5!n8!n2!n"), ("SK", "4!n6!n10!n"), ("SM", "1!a5!n5!n12!c"),
    ("SO", "4!n3!n12!n"), ("ST", "4!n4!n11!n2!n"), ("SV", "4!a20!n"), ("TL", "3!n14!n2!n"),
    ("TN", "2!n3!n13!n2!n"), ("TR", "5!n1!n16!c"), ("UA", "6!n19!c"), ("VA", "3!n15!n"),
    ("VG", "4!a16!n"), ("XK", "4!n10!n2!n"), ("YE", "4!a4!n18!c"),
];

/// Weights of the 6-digit account prefix (check digit last).
const PREFIX_WEIGHTS: [u32; 6] = [10, 5, 8, 4, 2, 1];

/// Weights of the 10-digit account number (check digit last).
const NUMBER_WEIGHTS: [u32; 10] = [6, 3, 7, 9, 10, 5, 8, 4, 2, 1];

/// Default IBAN validator.
///
/// Accepts uppercase electronic-format IBANs (no spaces) that:
/// - name a registered country
/// - follow that country's BBAN structure
/// - pass the national account checksum, where one is implemented (CZ, SK)
/// - have an ISO 7064 MOD 97-10 checksum of 1
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso13616Validator;

impl Iso13616Validator {
    pub fn new() -> Self {
        Self
    }
}

impl IbanValidator for Iso13616Validator {
    fn is_valid(&self, iban: &str) -> bool {
        let bytes = iban.as_bytes();
        if bytes.len() < 5 {
            return false;
        }
        if !bytes[..2].iter().all(u8::is_ascii_uppercase)
            || !bytes[2..4].iter().all(u8::is_ascii_digit)
        {
            return false;
        }
        let country = &iban[..2];
        let Some(format) = bban_format(country) else {
            return false;
        };
        let bban = &bytes[4..];
        matches_bban_format(bban, format)
            && has_valid_national_checksum(country, bban)
            && mod97(bytes) == 1
    }
}

fn bban_format(country: &str) -> Option<&'static str> {
    BBAN_FORMATS
        .binary_search_by(|(code, _)| code.cmp(&country))
        .ok()
        .map(|idx| BBAN_FORMATS[idx].1)
}

/// Match `bban` against a registry format such as `4!n6!n10!n`.
fn matches_bban_format(bban: &[u8], format: &str) -> bool {
    let mut rest = bban;
    let mut count = 0usize;
    for symbol in format.bytes() {
        match symbol {
            b'0'..=b'9' => count = count * 10 + usize::from(symbol - b'0'),
            b'!' => {}
            class => {
                let Some((run, tail)) = rest.split_at_checked(count) else {
                    return false;
                };
                let accepted = match class {
                    b'n' => run.iter().all(u8::is_ascii_digit),
                    b'a' => run.iter().all(u8::is_ascii_uppercase),
                    _ => run.iter().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()),
                };
                if !accepted {
                    return false;
                }
                rest = tail;
                count = 0;
            }
        }
    }
    rest.is_empty()
}

fn has_valid_national_checksum(country: &str, bban: &[u8]) -> bool {
    match country {
        "CZ" | "SK" => is_valid_czech_slovak_bban(bban),
        _ => true,
    }
}

/// Czech and Slovak BBAN: bank code (4), account prefix (6), account number (10).
/// Prefix and number each end in a weighted MOD 11 check digit.
fn is_valid_czech_slovak_bban(bban: &[u8]) -> bool {
    bban.len() == 20
        && has_mod11_check_digit(&bban[4..10], &PREFIX_WEIGHTS)
        && has_mod11_check_digit(&bban[10..], &NUMBER_WEIGHTS)
}

/// Expects ASCII digits. Remainder 1 maps to check digit 1.
fn has_mod11_check_digit(digits: &[u8], weights: &[u32]) -> bool {
    let Some((&check, body)) = digits.split_last() else {
        return false;
    };
    let sum: u32 = body
        .iter()
        .zip(weights)
        .map(|(&digit, &weight)| u32::from(digit - b'0') * weight)
        .sum();
    let expected = match sum % 11 {
        0 => 0,
        1 => 1,
        remainder => 11 - remainder,
    };
    u32::from(check - b'0') == expected
}

/// ISO 7064 MOD 97-10 over the rearranged IBAN (BBAN first, then country and check digits).
fn mod97(bytes: &[u8]) -> u32 {
    let (head, bban) = bytes.split_at(4);
    bban.iter().chain(head).fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            (acc * 10 + u32::from(b - b'0')) % 97
        } else {
            (acc * 100 + u32::from(b - b'A' + 10)) % 97
        }
    })
}

/// Validate a single account value (`IBAN` or `IBAN+BIC`).
///
/// When both parts around the first `+` are non-empty only the IBAN part is
/// checked; otherwise the whole value must be an IBAN.
pub fn is_valid_account(value: &str, validator: &dyn IbanValidator) -> bool {
    let mut parts = value.split('+');
    match (parts.next(), parts.next()) {
        (Some(iban), Some(bic)) if !iban.is_empty() && !bic.is_empty() => validator.is_valid(iban),
        _ => validator.is_valid(value),
    }
}

/// Validate a comma-separated list of accounts; every element must pass.
pub fn is_valid_account_list(value: &str, validator: &dyn IbanValidator) -> bool {
    value
        .split(',')
        .all(|account| is_valid_account(account, validator))
}
