//! `ease extract` - show what the scanner sees in a reply without running it.

use super::read_input;
use anyhow::Result;
use ease_actions::{CallExtractor, MarkerExtractor};
use ease_core::EaseConfig;

pub fn run(config: &EaseConfig, input: &str) -> Result<()> {
    let text = read_input(input)?;
    let extractor = MarkerExtractor::from_config(&config.extractor)?;

    let mut malformed = 0;
    for site in extractor.sites(&text) {
        match site.call {
            Some(call) => println!("{}", serde_json::to_string(&call)?),
            None => malformed += 1,
        }
    }
    if malformed > 0 {
        tracing::info!(malformed, "Malformed call sites skipped");
    }

    println!();
    println!("{}", extractor.clean(&text));
    Ok(())
}
