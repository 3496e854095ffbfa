//! Configuration types for Ease.
//!
//! A single YAML file (conventionally `ease.yaml`) configures the action
//! engine. Every section is optional and falls back to defaults:
//!
//! ```yaml
//! extractor:
//!   tag: FUNCTION
//! summary:
//!   success_prefix: "✅"
//!   failure_prefix: "❌"
//! catalog:
//!   sections: [home, mood, habits, chat, community, therapy, notifications, privacy]
//! observability:
//!   log_level: info
//! ```

pub mod catalog;
pub mod extractor;
pub mod observability;
pub mod summary;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub use catalog::CatalogConfig;
pub use extractor::ExtractorConfig;
pub use observability::ObservabilityConfig;
pub use summary::SummaryConfig;

/// Complete Ease configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EaseConfig {
    /// Call-site scanner settings.
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Outcome summary formatting.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Built-in catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl EaseConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.extractor.is_valid_tag() {
            return Err(ConfigError::Invalid(format!(
                "extractor.tag '{}' must be non-empty and contain only ASCII letters, digits or '_'",
                self.extractor.tag
            )));
        }

        if self.catalog.sections.is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.sections must list at least one section".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for section in &self.catalog.sections {
            if section.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "catalog.sections must not contain blank names".to_string(),
                ));
            }
            if !seen.insert(section.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "catalog.sections lists '{}' more than once",
                    section
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EaseConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EaseConfig::default());
        assert_eq!(config.extractor.tag, "FUNCTION");
        assert_eq!(config.summary.success_prefix, "✅");
        assert!(config.catalog.sections.contains(&"mood".to_string()));
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
extractor:
  tag: ACTION
summary:
  failure_prefix: "[x]"
"#;
        let config = EaseConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.extractor.tag, "ACTION");
        assert_eq!(config.summary.success_prefix, "✅");
        assert_eq!(config.summary.failure_prefix, "[x]");
    }

    #[test]
    fn rejects_tag_with_delimiters() {
        let err = EaseConfig::from_yaml("extractor:\n  tag: \"FN:\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EaseConfig::from_yaml("extractor:\n  tag: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_empty_or_duplicate_sections() {
        let err = EaseConfig::from_yaml("catalog:\n  sections: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EaseConfig::from_yaml("catalog:\n  sections: [mood, mood]\n").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "catalog:\n  sections: [home, mood]").unwrap();

        let config = EaseConfig::from_file(file.path()).unwrap();
        assert_eq!(config.catalog.sections, vec!["home", "mood"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EaseConfig::from_file("/definitely/not/here/ease.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
