//! Standard action catalog configuration.

use serde::{Deserialize, Serialize};

/// Settings that shape the built-in action schemas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// App sections `navigate_to_section` may target.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
        }
    }
}

fn default_sections() -> Vec<String> {
    [
        "home",
        "mood",
        "habits",
        "chat",
        "community",
        "therapy",
        "notifications",
        "privacy",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
