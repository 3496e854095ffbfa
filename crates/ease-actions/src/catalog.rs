//! The standard Ease action catalog.

use crate::error::RegistryError;
use crate::handlers::{
    AddHabitHandler, AddTodoHandler, BookAppointmentHandler, LogMoodHandler, NavigateHandler,
    SetReminderHandler,
};
use crate::registry::{ActionRegistry, ActionRegistryBuilder};
use ease_core::CatalogConfig;

/// Build the registry of built-in actions.
///
/// Registration order is also the order of `describe_for_prompt` and of the
/// exported tool definitions.
pub fn standard_registry(config: &CatalogConfig) -> Result<ActionRegistry, RegistryError> {
    Ok(standard_builder(config)?.build())
}

/// Builder pre-loaded with the built-in actions, for callers that add their own.
pub fn standard_builder(config: &CatalogConfig) -> Result<ActionRegistryBuilder, RegistryError> {
    ActionRegistry::builder()
        .register(NavigateHandler::schema(&config.sections), NavigateHandler)?
        .register(AddTodoHandler::schema(), AddTodoHandler)?
        .register(LogMoodHandler::schema(), LogMoodHandler)?
        .register(SetReminderHandler::schema(), SetReminderHandler)?
        .register(BookAppointmentHandler::schema(), BookAppointmentHandler)?
        .register(AddHabitHandler::schema(), AddHabitHandler)
}
