//! Argument validation for action calls.
//!
//! Every call is checked against its registered [`ActionSchema`] before a
//! handler sees it. Rules run in a fixed order and the first failure wins:
//!
//! 1. the action name resolves in the registry
//! 2. every required parameter is present (schema declaration order)
//! 3. every present argument has the declared JSON type
//! 4. enum arguments are members of the declared value set
//!
//! Arguments the schema does not declare are dropped, not rejected, so prompt
//! drift on the model side never breaks a call.

use crate::error::HandlerError;
use crate::registry::{ActionRegistry, RegisteredAction};
use ease_core::{ActionCall, ActionResult, ActionSchema, FailureKind, ParamKind, json_type_name};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// VALIDATION ERROR TYPES
// =============================================================================

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The kind of validation error.
    pub kind: FailureKind,
    /// Offending parameter, when the failure concerns one.
    pub parameter: Option<String>,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(kind: FailureKind, parameter: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            parameter: parameter.map(str::to_string),
            message: message.into(),
        }
    }

    /// The call names an action that is not registered.
    pub fn unknown_action(action: &str) -> Self {
        Self::new(
            FailureKind::UnknownAction,
            None,
            format!("Unknown action: {}", action),
        )
    }

    /// A required parameter is absent.
    pub fn missing_parameter(action: &str, parameter: &str) -> Self {
        Self::new(
            FailureKind::MissingParameter,
            Some(parameter),
            format!(
                "Missing required parameter '{}' for {}",
                parameter, action
            ),
        )
    }

    /// An argument has the wrong JSON type.
    pub fn type_mismatch(action: &str, parameter: &str, expected: &ParamKind, found: &Value) -> Self {
        let expected = match expected {
            ParamKind::Enum { .. } => "string",
            ParamKind::Array => "array of strings",
            other => other.type_name(),
        };
        Self::new(
            FailureKind::TypeMismatch,
            Some(parameter),
            format!(
                "Parameter '{}' for {} must be {} {}, got {}",
                parameter,
                action,
                article(expected),
                expected,
                json_type_name(found)
            ),
        )
    }

    /// An enum argument is outside the allowed set.
    pub fn invalid_enum_value(action: &str, parameter: &str, value: &str, allowed: &[String]) -> Self {
        Self::new(
            FailureKind::InvalidEnumValue,
            Some(parameter),
            format!(
                "Invalid value '{}' for parameter '{}' of {}; expected one of: {}",
                value,
                parameter,
                action,
                allowed.join(", ")
            ),
        )
    }

    /// Convert into the failed result reported to the user.
    pub fn into_result(self) -> ActionResult {
        ActionResult::failed(self.kind, self.message)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

// =============================================================================
// VALIDATED ARGUMENTS
// =============================================================================

/// Arguments that passed validation: declared parameters only, never `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArguments {
    values: Map<String, Value>,
}

impl ValidatedArguments {
    /// Raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(Value::as_f64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    /// Array-of-strings parameter; empty when absent.
    pub fn strings(&self, name: &str) -> Vec<String> {
        self.values
            .get(name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A string parameter the schema marks as required.
    pub fn require_str(&self, name: &str) -> Result<&str, HandlerError> {
        self.str(name).ok_or_else(|| HandlerError::InvalidArgument {
            parameter: name.to_string(),
            reason: "expected a string".to_string(),
        })
    }

    /// Borrow the underlying argument map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Resolve a call against the registry and validate its arguments.
pub fn validate_call<'r>(
    registry: &'r ActionRegistry,
    call: &ActionCall,
) -> Result<(&'r RegisteredAction, ValidatedArguments), ValidationError> {
    let entry = registry
        .get(&call.name)
        .ok_or_else(|| ValidationError::unknown_action(&call.name))?;
    let arguments = validate_arguments(&entry.schema, &call.arguments)?;
    Ok((entry, arguments))
}

/// Validate an argument object against a schema: required, type, then enum checks.
pub fn validate_arguments(
    schema: &ActionSchema,
    arguments: &Map<String, Value>,
) -> Result<ValidatedArguments, ValidationError> {
    // Required parameters first, in declaration order, so the reported
    // parameter is deterministic.
    for param in schema.required_parameters() {
        if is_absent(arguments.get(&param.name)) {
            return Err(ValidationError::missing_parameter(&schema.name, &param.name));
        }
    }

    for param in &schema.parameters {
        let Some(value) = arguments.get(&param.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if !param.kind.accepts(value) {
            return Err(ValidationError::type_mismatch(
                &schema.name,
                &param.name,
                &param.kind,
                value,
            ));
        }
    }

    let mut values = Map::new();
    for param in &schema.parameters {
        let Some(value) = arguments.get(&param.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if let ParamKind::Enum { values: allowed } = &param.kind {
            let text = value.as_str().unwrap_or_default();
            if !allowed.iter().any(|v| v == text) {
                return Err(ValidationError::invalid_enum_value(
                    &schema.name,
                    &param.name,
                    text,
                    allowed,
                ));
            }
        }
        values.insert(param.name.clone(), value.clone());
    }

    Ok(ValidatedArguments { values })
}

fn is_absent(value: Option<&Value>) -> bool {
    value.is_none_or(Value::is_null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ease_core::ParameterSpec;
    use serde_json::json;

    fn appointment_schema() -> ActionSchema {
        ActionSchema::new("book_therapist_appointment", "Request a session")
            .param(ParameterSpec::string("preferredDate").required())
            .param(ParameterSpec::string("preferredTime"))
            .param(ParameterSpec::enumeration("sessionType", ["individual", "group"]))
            .param(ParameterSpec::boolean("urgent"))
            .param(ParameterSpec::array("topics"))
            .param(ParameterSpec::number("duration"))
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_arguments_pass_and_drop_extras() {
        let validated = validate_arguments(
            &appointment_schema(),
            &args(json!({
                "preferredDate": "2024-06-01",
                "sessionType": "group",
                "urgent": true,
                "topics": ["sleep"],
                "duration": 50,
                "mood": "whatever"
            })),
        )
        .unwrap();

        assert_eq!(validated.str("preferredDate"), Some("2024-06-01"));
        assert_eq!(validated.bool("urgent"), Some(true));
        assert_eq!(validated.strings("topics"), vec!["sleep"]);
        assert_eq!(validated.number("duration"), Some(50.0));
        assert!(!validated.contains("mood"));
        assert_eq!(validated.len(), 5);
    }

    #[test]
    fn test_missing_required_parameter_is_named() {
        let err = validate_arguments(&appointment_schema(), &args(json!({"notes": "hi"})))
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::MissingParameter);
        assert_eq!(err.parameter.as_deref(), Some("preferredDate"));
        assert!(err.message.contains("preferredDate"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": null})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::MissingParameter);

        // Optional nulls are simply dropped.
        let validated = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": "tomorrow", "urgent": null})),
        )
        .unwrap();
        assert!(!validated.contains("urgent"));
    }

    #[test]
    fn test_first_missing_parameter_in_declaration_order() {
        let schema = ActionSchema::new("set_reminder", "Set a reminder")
            .param(ParameterSpec::string("title").required())
            .param(ParameterSpec::string("time").required());
        let err = validate_arguments(&schema, &Map::new()).unwrap_err();
        assert_eq!(err.parameter.as_deref(), Some("title"));
    }

    #[test]
    fn test_missing_wins_over_type_mismatch() {
        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"urgent": "yes"})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::MissingParameter);
    }

    #[test]
    fn test_type_mismatch_names_parameter() {
        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": 20240601})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::TypeMismatch);
        assert_eq!(err.parameter.as_deref(), Some("preferredDate"));
        assert!(err.message.contains("must be a string, got number"));
    }

    #[test]
    fn test_array_elements_must_be_strings() {
        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": "x", "topics": ["a", 2]})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::TypeMismatch);
        assert!(err.message.contains("an array of strings"));
    }

    #[test]
    fn test_enum_requires_string_then_membership() {
        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": "x", "sessionType": 3})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::TypeMismatch);

        let err = validate_arguments(
            &appointment_schema(),
            &args(json!({"preferredDate": "x", "sessionType": "couples"})),
        )
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEnumValue);
        assert_eq!(err.parameter.as_deref(), Some("sessionType"));
        assert!(err.message.contains("individual, group"));
    }

    #[test]
    fn test_into_result_is_failure() {
        let result = ValidationError::unknown_action("delete_universe").into_result();
        assert!(!result.success);
        assert_eq!(result.message, "Unknown action: delete_universe");
        assert_eq!(result.failure, Some(FailureKind::UnknownAction));
    }
}
