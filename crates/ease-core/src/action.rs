//! Action schemas and the call/result values that flow through the engine.
//!
//! An [`ActionSchema`] describes one action the AI companion may request.
//! An [`ActionCall`] is one request parsed out of a model reply, and an
//! [`ActionResult`] is the outcome of dispatching that call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog entry for an invokable action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionSchema {
    /// Unique, stable identifier (e.g. `add_todo`).
    pub name: String,

    /// Human-readable summary used when prompting the model.
    pub description: String,

    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl ActionSchema {
    /// Create a schema with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Get a parameter by name.
    pub fn get_parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Required parameters, in declaration order.
    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// Contract for a single action parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name as it appears in the argument object.
    pub name: String,

    /// Expected value kind.
    #[serde(flatten)]
    pub kind: ParamKind,

    /// Whether every call must supply this parameter.
    #[serde(default)]
    pub required: bool,

    /// Optional description for prompts and exported tool definitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    fn with_kind(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: None,
        }
    }

    /// An optional string parameter.
    pub fn string(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::String)
    }

    /// An optional number parameter.
    pub fn number(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Number)
    }

    /// An optional boolean parameter.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Boolean)
    }

    /// An optional array-of-strings parameter.
    pub fn array(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Array)
    }

    /// An optional parameter restricted to a fixed set of strings.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(
            name,
            ParamKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Value kinds an action parameter can declare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    /// A string that must be one of `values`.
    Enum { values: Vec<String> },
    /// An array whose elements are all strings.
    Array,
}

impl ParamKind {
    /// Short name used in messages (`string`, `enum`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Enum { .. } => "enum",
            ParamKind::Array => "array",
        }
    }

    /// Check the JSON shape of a value against this kind.
    ///
    /// Enum membership is not checked here; an enum only needs a string.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::String | ParamKind::Enum { .. } => value.is_string(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Array => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One invocation parsed from model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionCall {
    /// Action name as written by the model.
    pub name: String,

    /// Decoded argument object.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ActionCall {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a call from a JSON value; non-object values yield no arguments.
    pub fn from_value(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name, arguments)
    }
}

/// Why a call did not succeed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No action with that name is registered.
    UnknownAction,
    /// A required parameter was absent.
    MissingParameter,
    /// An argument had the wrong JSON type.
    TypeMismatch,
    /// An enum argument was outside its allowed set.
    InvalidEnumValue,
    /// The handler rejected the call or failed while running.
    HandlerFailed,
}

/// Outcome of dispatching one [`ActionCall`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult {
    pub success: bool,

    /// Human-readable outcome shown to the user.
    pub message: String,

    /// Structured description of the effect (e.g. the created record).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Set when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ActionResult {
    /// Create a successful result.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            failure: None,
        }
    }

    /// Create a failed result.
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            failure: Some(kind),
        }
    }

    /// Attach a structured payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}
