use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaydError {
    /// A field value was rejected by its attribute rule.
    #[error("Invalid value for attribute {name}: {value}")]
    InvalidAttributeValue { name: String, value: String },
}

impl SpaydError {
    pub fn invalid_attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAttributeValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Serialized attribute name (e.g. `AM`, `X-URL`).
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidAttributeValue { name, .. } => name,
        }
    }

    /// The rejected value, as it was presented to the rule.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidAttributeValue { value, .. } => value,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpaydError>;
