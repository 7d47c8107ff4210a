//! Short Payment Descriptor assembly.
//!
//! A descriptor is the protocol header followed by validated attributes, all
//! joined with `*`:
//!
//! ```text
//! SPD*1.0*ACC:CZ2806000000000168540115*AM:450.00*CC:CZK*MSG:PLATBA ZA ZBOZI*X-VS:1234567890
//! ```
//!
//! Fields are processed in the fixed order of [`FIELDS`](crate::fields::FIELDS).
//! The first rejected field aborts assembly; no partial descriptor is returned.

use spayd_model::{DescriptorOptions, PaymentRecord, Result};
use tracing::{debug, debug_span, trace};

use crate::account::{IbanValidator, Iso13616Validator};
use crate::attribute::Attribute;
use crate::fields::{FIELDS, RuleContext, TextHandling};
use crate::normalization::normalize_text;

/// Format identifier of the header.
pub const FORMAT_ID: &str = "SPD";

/// Protocol version emitted in the header.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Header literal (`SPD*1.0`).
pub const HEADER: &str = "SPD*1.0";

/// Attribute separator.
pub const DELIMITER: char = '*';

/// Attribute excluded from the canonical checksum input.
const CHECKSUM_ATTRIBUTE: &str = "CRC32";

/// Builds descriptors from payment records.
#[derive(Debug, Clone, Default)]
pub struct DescriptorAssembler<V = Iso13616Validator> {
    options: DescriptorOptions,
    validator: V,
}

impl DescriptorAssembler {
    /// Assembler with the default IBAN validator.
    pub fn new(options: DescriptorOptions) -> Self {
        Self {
            options,
            validator: Iso13616Validator,
        }
    }
}

impl<V: IbanValidator> DescriptorAssembler<V> {
    /// Assembler with a caller-supplied IBAN validator.
    pub fn with_validator(options: DescriptorOptions, validator: V) -> Self {
        Self { options, validator }
    }

    pub fn options(&self) -> &DescriptorOptions {
        &self.options
    }

    /// Validate every present field and return the attributes in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttributeValue` for the first field that fails its rule.
    pub fn attributes(&self, record: &PaymentRecord) -> Result<Vec<Attribute>> {
        let ctx = RuleContext {
            record,
            accounts: &self.validator,
        };
        let mut attributes = Vec::new();

        for spec in FIELDS {
            let Some(raw) = (spec.extract)(record) else {
                continue;
            };
            let value = match spec.text {
                TextHandling::Verbatim => raw,
                TextHandling::Normalized => normalize_text(&raw, self.options.transliterate),
            };
            let rule = spec.rule.bind(&ctx);
            match Attribute::new(spec.name, value, Some(&rule)) {
                Ok(attribute) => {
                    trace!(attribute = spec.name, "accepted attribute");
                    attributes.push(attribute);
                }
                Err(error) => {
                    debug!(attribute = spec.name, "rejected attribute");
                    return Err(error);
                }
            }
        }

        Ok(attributes)
    }

    /// Build the descriptor string for `record`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttributeValue` for the first field that fails its rule.
    pub fn assemble(&self, record: &PaymentRecord) -> Result<String> {
        let _span = debug_span!(
            "assemble_descriptor",
            transliterate = self.options.transliterate
        )
        .entered();

        let attributes = self.attributes(record)?;
        debug!(attributes = attributes.len(), "descriptor assembled");
        Ok(join_descriptor(&attributes))
    }

    /// Build the canonical form used as CRC32 input.
    ///
    /// All attributes except `CRC32` are sorted by name, then by value, and joined
    /// after the header. The checksum itself is computed by the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttributeValue` for the first field that fails its rule.
    pub fn canonical_string(&self, record: &PaymentRecord) -> Result<String> {
        let mut attributes: Vec<Attribute> = self
            .attributes(record)?
            .into_iter()
            .filter(|attribute| attribute.name() != CHECKSUM_ATTRIBUTE)
            .collect();
        attributes.sort();
        Ok(join_descriptor(&attributes))
    }
}

fn join_descriptor(attributes: &[Attribute]) -> String {
    let mut out = String::from(HEADER);
    for attribute in attributes {
        out.push(DELIMITER);
        out.push_str(&attribute.to_string());
    }
    out
}

/// Build a descriptor with the default IBAN validator.
///
/// # Example
/// ```
/// use spayd_core::create_short_payment_descriptor;
/// use spayd_model::{DescriptorOptions, PaymentRecord};
///
/// let record = PaymentRecord {
///     acc: Some("CZ2806000000000168540115".to_string()),
///     am: Some("450.00".to_string()),
///     cc: Some("CZK".to_string()),
///     ..PaymentRecord::default()
/// };
/// let descriptor = create_short_payment_descriptor(&record, &DescriptorOptions::default())?;
/// assert_eq!(descriptor, "SPD*1.0*ACC:CZ2806000000000168540115*AM:450.00*CC:CZK");
/// # Ok::<(), spayd_model::SpaydError>(())
/// ```
///
/// # Errors
///
/// Returns `InvalidAttributeValue` for the first field that fails its rule.
pub fn create_short_payment_descriptor(
    record: &PaymentRecord,
    options: &DescriptorOptions,
) -> Result<String> {
    DescriptorAssembler::new(*options).assemble(record)
}
