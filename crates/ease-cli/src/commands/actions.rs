//! Catalog introspection.
//!
//! `ease actions list` - List actions with their parameters.
//! `ease actions describe` - Show the tool definition of one action.
//! `ease prompt` - Print the capability block for the system prompt.

use super::registry;
use anyhow::{Result, anyhow};
use ease_actions::{ActionEngine, ToolDefinition};
use ease_core::{ActionSchema, EaseConfig, ParamKind};
use std::sync::Arc;

/// List actions in registration order.
pub fn list(config: &EaseConfig, json: bool) -> Result<()> {
    let registry = registry(config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&registry.tool_definitions())?
        );
        return Ok(());
    }

    println!("\n🔧 Available Actions ({}):", registry.len());
    for schema in registry.list_schemas() {
        println!("   • {}", schema.name);
        println!("     {}", schema.description);
        for line in parameter_lines(schema) {
            println!("       {}", line);
        }
    }
    println!();

    Ok(())
}

/// Show one action's tool definition.
pub fn describe(config: &EaseConfig, action_name: &str) -> Result<()> {
    let registry = registry(config)?;
    let schema = registry
        .get_schema(action_name)
        .map_err(|_| anyhow!("Action '{}' not found", action_name))?;
    let tool = ToolDefinition::from_schema(schema);

    println!("\nAction: {}", tool.name);
    println!("\nDescription: {}", tool.description);
    println!("\nParameters:");
    for line in parameter_lines(schema) {
        println!("  {}", line);
    }
    println!("\nInput Schema:");
    println!("{}", serde_json::to_string_pretty(&tool.input_schema)?);

    Ok(())
}

pub fn prompt(config: &EaseConfig) -> Result<()> {
    let engine = ActionEngine::from_config(config, Arc::new(registry(config)?))?;
    println!("{}", engine.prompt_capabilities());
    Ok(())
}

/// `- name (type, required): description` per parameter.
fn parameter_lines(schema: &ActionSchema) -> Vec<String> {
    schema
        .parameters
        .iter()
        .map(|param| {
            let kind = match &param.kind {
                ParamKind::Enum { values } => format!("one of {}", values.join("|")),
                other => other.type_name().to_string(),
            };
            let required = if param.required { ", required" } else { "" };
            match &param.description {
                Some(desc) => format!("- {} ({}{}): {}", param.name, kind, required, desc),
                None => format!("- {} ({}{})", param.name, kind, required),
            }
        })
        .collect()
}
