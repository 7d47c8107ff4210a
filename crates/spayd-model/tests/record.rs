//! Tests for spayd-model types.

use chrono::NaiveDate;
use spayd_model::{DescriptorOptions, NotificationType, PaymentRecord};

#[test]
fn record_deserializes_from_spayd_keys() {
    let json = r#"{
        "acc": "CZ5855000000001265098001+RZBCCZPP",
        "altAcc": ["CZ5855000000001265098001"],
        "am": "480.55",
        "cc": "CZK",
        "dt": "2018-04-20",
        "nt": "P",
        "nta": "+420123456789",
        "x": { "vs": "1234567890", "per": "7" }
    }"#;
    let record: PaymentRecord = serde_json::from_str(json).expect("deserialize record");

    assert_eq!(
        record.acc.as_deref(),
        Some("CZ5855000000001265098001+RZBCCZPP")
    );
    assert_eq!(record.alt_acc, vec!["CZ5855000000001265098001".to_string()]);
    assert_eq!(record.dt, NaiveDate::from_ymd_opt(2018, 4, 20));
    assert_eq!(record.nt, Some(NotificationType::Phone));
    let x = record.extended().expect("extended block");
    assert_eq!(x.vs.as_deref(), Some("1234567890"));
    assert_eq!(x.per.as_deref(), Some("7"));
    assert!(x.url.is_none());
    assert!(record.msg.is_none());
}

#[test]
fn empty_object_is_an_empty_record() {
    let record: PaymentRecord = serde_json::from_str("{}").expect("deserialize record");
    assert_eq!(record, PaymentRecord::default());
}

#[test]
fn unknown_notification_type_fails_to_deserialize() {
    let result = serde_json::from_str::<PaymentRecord>(r#"{"nt": "X"}"#);
    assert!(result.is_err());
}

#[test]
fn record_serialization_skips_absent_fields() {
    let record = PaymentRecord {
        am: Some("100.00".to_string()),
        ..PaymentRecord::default()
    };
    let json = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(json, r#"{"am":"100.00"}"#);
}

#[test]
fn options_default_and_builder() {
    assert!(!DescriptorOptions::default().transliterate);
    assert!(DescriptorOptions::new().with_transliterate(true).transliterate);

    let options: DescriptorOptions = serde_json::from_str("{}").expect("deserialize options");
    assert_eq!(options, DescriptorOptions::default());
}
