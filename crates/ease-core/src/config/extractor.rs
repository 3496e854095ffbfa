//! Call-site extraction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the call-site scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractorConfig {
    /// Marker tag; call sites look like `[<tag>:<name>:{...}]`.
    #[serde(default = "default_tag")]
    pub tag: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { tag: default_tag() }
    }
}

impl ExtractorConfig {
    /// See [`is_valid_tag`].
    pub fn is_valid_tag(&self) -> bool {
        is_valid_tag(&self.tag)
    }
}

/// A tag must be a non-empty run of ASCII letters, digits or `_`, so the
/// `[<tag>:` header cannot be confused with its own delimiters.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn default_tag() -> String {
    "FUNCTION".to_string()
}
