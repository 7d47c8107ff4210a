//! Short Payment Descriptor (SPAYD) encoding.
//!
//! Turns a [`PaymentRecord`](spayd_model::PaymentRecord) into the `*`-delimited
//! descriptor string used in Czech and Slovak payment QR codes.
//!
//! # Components
//!
//! - [`normalization`]: escapes free text so it cannot break the format
//! - [`attribute`]: `NAME:value` pairs validated at construction
//! - [`fields`]: the ordered field table with per-field rules
//! - [`descriptor`]: assembly of the final string
//!
//! The crate performs no I/O and keeps no state between calls; an assembler can
//! be shared freely between threads.

pub mod account;
pub mod attribute;
pub mod date;
pub mod descriptor;
pub mod fields;
pub mod normalization;

pub use account::{IbanValidator, Iso13616Validator};
pub use attribute::{Attribute, Rule};
pub use descriptor::{
    DescriptorAssembler, HEADER, PROTOCOL_VERSION, create_short_payment_descriptor,
};
pub use normalization::normalize_text;
