//! Result summary formatting.

use serde::{Deserialize, Serialize};

/// Prefixes used when rendering action outcomes under a chat reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryConfig {
    #[serde(default = "default_success_prefix")]
    pub success_prefix: String,

    #[serde(default = "default_failure_prefix")]
    pub failure_prefix: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            success_prefix: default_success_prefix(),
            failure_prefix: default_failure_prefix(),
        }
    }
}

fn default_success_prefix() -> String {
    "✅".to_string()
}

fn default_failure_prefix() -> String {
    "❌".to_string()
}
