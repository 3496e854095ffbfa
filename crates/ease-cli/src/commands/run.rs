//! `ease run` - process a reply end to end against local files.
//!
//! Records go to one JSON-lines file per record type under the data
//! directory. Navigation is only logged.

use super::{read_input, registry};
use anyhow::{Context, Result};
use ease_actions::{ActionEngine, ExecutionContext, JsonLinesHook, Navigator, PersistenceHooks};
use ease_core::{EaseConfig, UserIdentity};
use std::path::Path;
use std::sync::Arc;

/// Navigator for a headless run.
struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, destination: &str) {
        tracing::info!(destination, "Navigate");
    }
}

/// Hooks appending to `<data_dir>/<kind>.jsonl`.
pub fn file_hooks(data_dir: &Path) -> Result<PersistenceHooks> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    Ok(PersistenceHooks {
        todos: Arc::new(JsonLinesHook::new(data_dir.join("todos.jsonl"))),
        moods: Arc::new(JsonLinesHook::new(data_dir.join("moods.jsonl"))),
        reminders: Arc::new(JsonLinesHook::new(data_dir.join("reminders.jsonl"))),
        appointments: Arc::new(JsonLinesHook::new(data_dir.join("appointments.jsonl"))),
        habits: Arc::new(JsonLinesHook::new(data_dir.join("habits.jsonl"))),
    })
}

pub async fn run(
    config: &EaseConfig,
    input: &str,
    user: &str,
    data_dir: &Path,
    json: bool,
) -> Result<()> {
    let text = read_input(input)?;
    let engine = ActionEngine::from_config(config, Arc::new(registry(config)?))?;
    let ctx = ExecutionContext::new(
        Arc::new(LoggingNavigator),
        UserIdentity::new(user),
        file_hooks(data_dir)?,
    );

    let reply = engine.process(&text, &ctx).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.display_text);
    }
    Ok(())
}
