//! Validated descriptor attributes.
//!
//! An [`Attribute`] is a `NAME:value` pair that has already passed its [`Rule`].
//! Validation happens once, in [`Attribute::new`]; there is no way to obtain an
//! attribute holding a rejected value.

use std::fmt;

use regex::Regex;
use spayd_model::{Result, SpaydError};

/// Acceptance rule for an attribute value.
pub enum Rule<'a> {
    /// The value must match the (anchored) pattern.
    Pattern(&'a Regex),
    /// The value must satisfy the predicate.
    Predicate(Box<dyn Fn(&str) -> bool + 'a>),
}

impl<'a> Rule<'a> {
    pub fn predicate(check: impl Fn(&str) -> bool + 'a) -> Self {
        Self::Predicate(Box::new(check))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(value),
            Self::Predicate(check) => check(value),
        }
    }
}

impl fmt::Debug for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A single `NAME:value` descriptor attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Build an attribute, validating `value` against `rule` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`SpaydError::InvalidAttributeValue`] if the rule rejects the value.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        rule: Option<&Rule<'_>>,
    ) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        if let Some(rule) = rule
            && !rule.matches(&value)
        {
            return Err(SpaydError::InvalidAttributeValue { name, value });
        }
        Ok(Self { name, value })
    }

    #[cfg(test)]
    pub(crate) fn unchecked(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}
