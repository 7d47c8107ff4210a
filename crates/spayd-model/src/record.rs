//! Payment record model.
//!
//! A [`PaymentRecord`] is the sparse input of descriptor assembly: every field is
//! optional and an absent field simply produces no attribute. Values are kept as
//! the caller supplied them; all format checks happen during assembly.
//!
//! ## Serialized form
//!
//! Records deserialize from the conventional SPAYD input keys:
//!
//! ```text
//! { "acc": "CZ2806000000000168540115", "am": "450.00", "cc": "CZK",
//!   "dt": "2018-04-20", "nt": "E", "x": { "vs": "1234567890" } }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SpaydError;

/// Channel used to notify the payment issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    /// Notification by email address.
    #[serde(rename = "E")]
    Email,
    /// Notification by phone number.
    #[serde(rename = "P")]
    Phone,
}

impl NotificationType {
    /// Single-letter code used in the `NT` attribute.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Email => "E",
            Self::Phone => "P",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for NotificationType {
    type Err = SpaydError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(Self::Email),
            "P" => Ok(Self::Phone),
            other => Err(SpaydError::invalid_attribute("NT", other)),
        }
    }
}

/// Payment instruction fields, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Counterparty account: `IBAN` or `IBAN+BIC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acc: Option<String>,

    /// Alternative accounts, each in the same format as `acc`.
    /// An empty list is treated as absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_acc: Vec<String>,

    /// Amount with a dot decimal separator (e.g. `480.55`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub am: Option<String>,

    /// ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// Payment identifier for the recipient, up to 16 digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rf: Option<String>,

    /// Recipient name, up to 35 characters once escaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rn: Option<String>,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<NaiveDate>,

    /// Payment type (e.g. `IP` for an instant payment), up to 3 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<String>,

    /// Message for the recipient, up to 60 characters once escaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Caller-computed checksum, 8 uppercase hex digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crc32: Option<String>,

    /// Notification channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nt: Option<NotificationType>,

    /// Notification address: email or phone number depending on `nt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nta: Option<String>,

    /// Czech extended attributes (`X-*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<ExtendedAttributes>,
}

/// Extended attributes for domestic Czech payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedAttributes {
    /// Days to retry an unsuccessful payment, 0 to 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<String>,

    /// Variable symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs: Option<String>,

    /// Specific symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ss: Option<String>,

    /// Constant symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ks: Option<String>,

    /// Payer-side payment identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free-use URL (`http` or `https`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PaymentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extended attributes, if any were supplied.
    pub fn extended(&self) -> Option<&ExtendedAttributes> {
        self.x.as_ref()
    }

    /// Mutable access to the extended block, creating it when absent.
    pub fn extended_mut(&mut self) -> &mut ExtendedAttributes {
        self.x.get_or_insert_with(ExtendedAttributes::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_type_codes() {
        assert_eq!(NotificationType::Email.as_code(), "E");
        assert_eq!(NotificationType::Phone.to_string(), "P");
        assert_eq!("E".parse::<NotificationType>(), Ok(NotificationType::Email));
    }

    #[test]
    fn unknown_notification_type_is_rejected_as_nt() {
        let err = "X".parse::<NotificationType>().unwrap_err();
        assert_eq!(err.name(), "NT");
        assert_eq!(err.to_string(), "Invalid value for attribute NT: X");
    }

    #[test]
    fn extended_mut_creates_block() {
        let mut record = PaymentRecord::new();
        assert!(record.extended().is_none());
        record.extended_mut().vs = Some("123".to_string());
        assert_eq!(
            record.extended().and_then(|x| x.vs.as_deref()),
            Some("123")
        );
    }
}
