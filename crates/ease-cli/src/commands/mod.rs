//! CLI command implementations.

pub mod actions;
pub mod extract;
pub mod run;

use anyhow::{Context, Result};
use ease_actions::{ActionRegistry, standard_registry};
use ease_core::EaseConfig;
use std::io::Read;

/// Read a reply from a file path, or from stdin when the path is `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read reply from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(input).with_context(|| format!("Failed to read reply from {}", input))
}

/// The standard catalog, shaped by the configuration.
pub fn registry(config: &EaseConfig) -> Result<ActionRegistry> {
    standard_registry(&config.catalog).context("Failed to build the action catalog")
}
