//! Configuration options for descriptor assembly.

use serde::{Deserialize, Serialize};

/// Options for building a short payment descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorOptions {
    /// Uppercase free-text fields (RN, MSG, X-URL) and strip diacritics
    /// before escaping.
    /// Default: false.
    pub transliterate: bool,
}

impl DescriptorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transliterate(mut self, enable: bool) -> Self {
        self.transliterate = enable;
        self
    }
}
