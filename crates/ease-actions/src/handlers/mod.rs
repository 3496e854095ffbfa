//! Built-in action handlers.
//!
//! One handler per action of the standard catalog. Each exposes the schema it
//! is registered under, so the catalog and the handler cannot disagree on
//! parameter names or enum values.

mod appointment;
mod habit;
mod mood;
mod navigation;
mod reminder;
mod todo;

pub use appointment::BookAppointmentHandler;
pub use habit::AddHabitHandler;
pub use mood::LogMoodHandler;
pub use navigation::NavigateHandler;
pub use reminder::SetReminderHandler;
pub use todo::AddTodoHandler;

use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use ease_core::{ActionResult, FailureKind};
use serde::Serialize;
use serde_json::Value;

/// A user-facing rejection that is not a validation failure.
fn rejected(message: impl Into<String>) -> ActionResult {
    ActionResult::failed(FailureKind::HandlerFailed, message)
}

/// Trimmed value of a required string argument, `None` when blank.
fn non_blank<'a>(args: &'a ValidatedArguments, name: &str) -> Result<Option<&'a str>, HandlerError> {
    let value = args.require_str(name)?.trim();
    Ok((!value.is_empty()).then_some(value))
}

/// Optional string argument; blank counts as absent.
fn optional_text(args: &ValidatedArguments, name: &str) -> Option<String> {
    args.str(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an optional enum argument, falling back to the type's default.
fn enum_or_default<T: Default>(
    args: &ValidatedArguments,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, HandlerError> {
    match args.str(name) {
        None => Ok(T::default()),
        Some(raw) => parse(raw).ok_or_else(|| HandlerError::InvalidArgument {
            parameter: name.to_string(),
            reason: format!("unsupported value {:?}", raw),
        }),
    }
}

fn record_data<R: Serialize>(record: &R) -> Result<Value, HandlerError> {
    serde_json::to_value(record).map_err(|e| HandlerError::Internal(e.into()))
}
