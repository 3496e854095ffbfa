//! Action registry.
//!
//! Holds the fixed catalog of actions. Each schema is registered together
//! with the handler that performs it, so looking up a name yields both the
//! contract to validate against and the code to run. The registry is built
//! once at startup and is read-only afterwards.

use crate::dispatcher::ActionHandler;
use crate::error::RegistryError;
use crate::tool_definition::ToolDefinition;
use ease_core::{ActionSchema, ParamKind};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A schema paired with its handler.
#[derive(Clone)]
pub struct RegisteredAction {
    pub schema: ActionSchema,
    pub handler: Arc<dyn ActionHandler>,
}

impl fmt::Debug for RegisteredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredAction")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Immutable catalog of actions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: Vec<RegisteredAction>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Start building a registry.
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Get an action (schema and handler) by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisteredAction> {
        self.index.get(name).map(|&i| &self.actions[i])
    }

    /// Get a schema by exact name.
    pub fn get_schema(&self, name: &str) -> Result<&ActionSchema, RegistryError> {
        self.get(name)
            .map(|action| &action.schema)
            .ok_or_else(|| RegistryError::SchemaNotFound {
                name: name.to_string(),
            })
    }

    /// Check if an action exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All schemas, in registration order.
    pub fn list_schemas(&self) -> Vec<&ActionSchema> {
        self.actions.iter().map(|a| &a.schema).collect()
    }

    /// Action names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.schema.name.as_str()).collect()
    }

    /// One `- <name>: <description>` line per action, for the system prompt.
    pub fn describe_for_prompt(&self) -> String {
        self.actions
            .iter()
            .map(|a| format!("- {}: {}", a.schema.name, a.schema.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// JSON Schema tool definitions for every action, in registration order.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.actions
            .iter()
            .map(|a| ToolDefinition::from_schema(&a.schema))
            .collect()
    }

    /// Get the number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Builder that checks each schema as it is registered.
#[derive(Default)]
pub struct ActionRegistryBuilder {
    registry: ActionRegistry,
}

impl ActionRegistryBuilder {
    /// Register an action. Fails on duplicate names or malformed schemas.
    pub fn register<H>(self, schema: ActionSchema, handler: H) -> Result<Self, RegistryError>
    where
        H: ActionHandler + 'static,
    {
        self.register_arc(schema, Arc::new(handler))
    }

    /// Register an action whose handler is already shared.
    pub fn register_arc(
        mut self,
        schema: ActionSchema,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<Self, RegistryError> {
        check_schema(&schema)?;

        if self.registry.index.contains_key(&schema.name) {
            return Err(RegistryError::DuplicateAction { name: schema.name });
        }

        let position = self.registry.actions.len();
        self.registry.index.insert(schema.name.clone(), position);
        self.registry
            .actions
            .push(RegisteredAction { schema, handler });
        Ok(self)
    }

    pub fn build(self) -> ActionRegistry {
        tracing::debug!(actions = self.registry.len(), "Action registry built");
        self.registry
    }
}

fn check_schema(schema: &ActionSchema) -> Result<(), RegistryError> {
    check_name(&schema.name)?;

    let mut seen = HashSet::new();
    for param in &schema.parameters {
        if param.name.trim().is_empty() {
            return Err(RegistryError::InvalidName {
                name: param.name.clone(),
                reason: format!("parameter of action {} has an empty name", schema.name),
            });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(RegistryError::DuplicateParameter {
                action: schema.name.clone(),
                parameter: param.name.clone(),
            });
        }
        if let ParamKind::Enum { values } = &param.kind {
            if values.is_empty() {
                return Err(RegistryError::EmptyEnum {
                    action: schema.name.clone(),
                    parameter: param.name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Action names must be writable inside a call site.
fn check_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason: "action name is empty".to_string(),
        });
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, ':' | '[' | ']'))
    {
        return Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason: format!("action name contains {:?}", c),
        });
    }
    Ok(())
}
