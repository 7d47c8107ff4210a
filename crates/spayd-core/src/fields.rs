//! Field table for descriptor assembly.
//!
//! Each [`FieldSpec`] describes one descriptor attribute:
//! - the serialized attribute name (`ACC`, `X-VS`, ...)
//! - how its value is read from the [`PaymentRecord`]
//! - whether the value is free text that must be normalized first
//! - the [`FieldRule`] the value must satisfy
//!
//! [`FIELDS`] is processed in order, so its order is the attribute order of
//! every descriptor.

use std::sync::LazyLock;

use regex::Regex;
use spayd_model::{NotificationType, PaymentRecord, is_known_currency};
use url::Url;

use crate::account::{IbanValidator, is_valid_account, is_valid_account_list};
use crate::attribute::Rule;
use crate::date::format_date;

static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*(\.[0-9]{2})?$").expect("Invalid amount regex"));

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,16}$").expect("Invalid reference regex"));

static RECIPIENT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^*]{1,35}$").expect("Invalid recipient name regex"));

static PAYMENT_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^*]{1,3}$").expect("Invalid payment type regex"));

static MESSAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^*]{1,60}$").expect("Invalid message regex"));

static CRC32_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-F0-9]{8}$").expect("Invalid CRC32 regex"));

static NOTIFICATION_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[EP]$").expect("Invalid notification type regex"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^*]{1,64}@[^*]{1,255}$").expect("Invalid email regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9]{1,14}$").expect("Invalid phone regex"));

static RETRY_DAYS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(30|[12]?[0-9])$").expect("Invalid retry days regex"));

/// Variable, specific and constant symbols: positive integer, at most 10 digits.
static SYMBOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{0,9}$").expect("Invalid symbol regex"));

static PAYMENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^*]{1,20}$").expect("Invalid payment id regex"));

/// Inputs available to a field rule besides the value itself.
pub struct RuleContext<'a> {
    /// The whole record being assembled.
    pub record: &'a PaymentRecord,
    /// IBAN validator used by account rules.
    pub accounts: &'a dyn IbanValidator,
}

/// Static description of a field's acceptance rule.
#[derive(Clone, Copy)]
pub enum FieldRule {
    Pattern(&'static LazyLock<Regex>),
    Predicate(fn(&str, &RuleContext<'_>) -> bool),
}

impl FieldRule {
    /// Bind the rule to a record, producing an attribute [`Rule`].
    pub fn bind<'a>(&self, ctx: &'a RuleContext<'a>) -> Rule<'a> {
        match *self {
            Self::Pattern(regex) => Rule::Pattern(LazyLock::force(regex)),
            Self::Predicate(check) => Rule::predicate(move |value| check(value, ctx)),
        }
    }
}

/// How a field value is prepared before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHandling {
    /// Used as extracted.
    Verbatim,
    /// Free text: normalized (escaped, optionally transliterated).
    Normalized,
}

/// One entry of the field table.
pub struct FieldSpec {
    /// Serialized attribute name.
    pub name: &'static str,
    /// Reads the raw value; `None` when the field is absent.
    pub extract: fn(&PaymentRecord) -> Option<String>,
    pub text: TextHandling,
    pub rule: FieldRule,
}

/// Attribute names in serialization order.
pub const FIELD_ORDER: [&str; 18] = [
    "ACC", "ALT-ACC", "AM", "CC", "RF", "RN", "DT", "PT", "MSG", "CRC32", "NT", "NTA", "X-PER",
    "X-VS", "X-SS", "X-KS", "X-ID", "X-URL",
];

/// The field table, in serialization order.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "ACC",
        extract: |r| r.acc.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Predicate(|value, ctx| is_valid_account(value, ctx.accounts)),
    },
    FieldSpec {
        name: "ALT-ACC",
        extract: |r| (!r.alt_acc.is_empty()).then(|| r.alt_acc.join(",")),
        text: TextHandling::Verbatim,
        rule: FieldRule::Predicate(|value, ctx| is_valid_account_list(value, ctx.accounts)),
    },
    FieldSpec {
        name: "AM",
        extract: |r| r.am.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&AMOUNT_REGEX),
    },
    FieldSpec {
        name: "CC",
        extract: |r| r.cc.as_deref().map(str::to_uppercase),
        text: TextHandling::Verbatim,
        rule: FieldRule::Predicate(|value, _| is_known_currency(value)),
    },
    FieldSpec {
        name: "RF",
        extract: |r| r.rf.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&REFERENCE_REGEX),
    },
    FieldSpec {
        name: "RN",
        extract: |r| r.rn.clone(),
        text: TextHandling::Normalized,
        rule: FieldRule::Pattern(&RECIPIENT_NAME_REGEX),
    },
    FieldSpec {
        name: "DT",
        extract: |r| r.dt.map(format_date),
        text: TextHandling::Verbatim,
        rule: FieldRule::Predicate(|_, ctx| ctx.record.dt.is_some()),
    },
    FieldSpec {
        name: "PT",
        extract: |r| r.pt.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&PAYMENT_TYPE_REGEX),
    },
    FieldSpec {
        name: "MSG",
        extract: |r| r.msg.clone(),
        text: TextHandling::Normalized,
        rule: FieldRule::Pattern(&MESSAGE_REGEX),
    },
    FieldSpec {
        name: "CRC32",
        extract: |r| r.crc32.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&CRC32_REGEX),
    },
    FieldSpec {
        name: "NT",
        extract: |r| r.nt.map(|nt| nt.as_code().to_string()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&NOTIFICATION_TYPE_REGEX),
    },
    FieldSpec {
        name: "NTA",
        extract: |r| r.nta.clone(),
        text: TextHandling::Verbatim,
        rule: FieldRule::Predicate(is_valid_notification_address),
    },
    FieldSpec {
        name: "X-PER",
        extract: |r| r.x.as_ref().and_then(|x| x.per.clone()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&RETRY_DAYS_REGEX),
    },
    FieldSpec {
        name: "X-VS",
        extract: |r| r.x.as_ref().and_then(|x| x.vs.clone()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&SYMBOL_REGEX),
    },
    FieldSpec {
        name: "X-SS",
        extract: |r| r.x.as_ref().and_then(|x| x.ss.clone()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&SYMBOL_REGEX),
    },
    FieldSpec {
        name: "X-KS",
        extract: |r| r.x.as_ref().and_then(|x| x.ks.clone()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&SYMBOL_REGEX),
    },
    FieldSpec {
        name: "X-ID",
        extract: |r| r.x.as_ref().and_then(|x| x.id.clone()),
        text: TextHandling::Verbatim,
        rule: FieldRule::Pattern(&PAYMENT_ID_REGEX),
    },
    FieldSpec {
        name: "X-URL",
        extract: |r| r.x.as_ref().and_then(|x| x.url.clone()),
        text: TextHandling::Normalized,
        rule: FieldRule::Predicate(|value, _| is_http_url(value)),
    },
];

/// `NTA` depends on `NT`: email or phone shape, and always rejected without a
/// notification type.
fn is_valid_notification_address(value: &str, ctx: &RuleContext<'_>) -> bool {
    match ctx.record.nt {
        Some(NotificationType::Email) => EMAIL_REGEX.is_match(value),
        Some(NotificationType::Phone) => PHONE_REGEX.is_match(value),
        None => false,
    }
}

/// Absolute URL with an `http` or `https` scheme.
fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
