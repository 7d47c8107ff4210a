//! Data model for Short Payment Descriptors (SPAYD).

pub mod currency;
pub mod error;
pub mod options;
pub mod record;

pub use currency::{CURRENCY_CODES, CURRENCY_TABLE_REVISION, is_known_currency};
pub use error::{Result, SpaydError};
pub use options::DescriptorOptions;
pub use record::{ExtendedAttributes, NotificationType, PaymentRecord};
