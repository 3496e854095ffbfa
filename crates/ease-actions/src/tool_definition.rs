//! JSON Schema export of the action catalog.
//!
//! Model providers with native tool calling accept a list of tools, each with
//! a JSON Schema for its input. This renders registered [`ActionSchema`]s in
//! that shape so the same catalog drives both the bracketed call-site
//! protocol and native tool definitions.

use ease_core::{ActionSchema, ParamKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Tool definition with a JSON Schema input contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Render an action schema as a tool definition.
    pub fn from_schema(schema: &ActionSchema) -> Self {
        Self {
            name: schema.name.clone(),
            description: schema.description.clone(),
            input_schema: input_schema(schema),
        }
    }
}

/// JSON Schema (`type: object`) for an action's arguments.
///
/// Undeclared properties stay allowed, matching the validator, which ignores
/// them. The validator also reads `null` as "not given", so optional
/// properties accept `null` while required ones do not.
pub fn input_schema(schema: &ActionSchema) -> Value {
    let mut properties = Map::new();
    for param in &schema.parameters {
        let nullable = !param.required;
        let type_of = |name: &str| {
            if nullable {
                json!([name, "null"])
            } else {
                json!(name)
            }
        };
        let mut property = match &param.kind {
            ParamKind::String => json!({ "type": type_of("string") }),
            ParamKind::Number => json!({ "type": type_of("number") }),
            ParamKind::Boolean => json!({ "type": type_of("boolean") }),
            ParamKind::Enum { values } => {
                let mut allowed: Vec<Value> = values.iter().map(|v| json!(v)).collect();
                if nullable {
                    allowed.push(Value::Null);
                }
                json!({ "type": type_of("string"), "enum": allowed })
            }
            ParamKind::Array => json!({ "type": type_of("array"), "items": { "type": "string" } }),
        };
        if let (Some(description), Some(obj)) = (&param.description, property.as_object_mut()) {
            obj.insert("description".to_string(), json!(description));
        }
        properties.insert(param.name.clone(), property);
    }

    let required: Vec<&str> = schema
        .required_parameters()
        .map(|p| p.name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ease_core::ParameterSpec;

    #[test]
    fn test_input_schema_shape() {
        let schema = ActionSchema::new("add_todo", "Add a to-do")
            .param(ParameterSpec::string("title").required().describe("Short title"))
            .param(ParameterSpec::enumeration("priority", ["low", "high"]))
            .param(ParameterSpec::array("tags"));

        let tool = ToolDefinition::from_schema(&schema);
        assert_eq!(tool.name, "add_todo");
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(tool.input_schema["required"], json!(["title"]));
        assert_eq!(
            tool.input_schema["properties"]["title"]["description"],
            "Short title"
        );
        assert_eq!(tool.input_schema["properties"]["title"]["type"], "string");
        assert_eq!(
            tool.input_schema["properties"]["priority"]["type"],
            json!(["string", "null"])
        );
        assert_eq!(
            tool.input_schema["properties"]["priority"]["enum"],
            json!(["low", "high", null])
        );
        assert_eq!(
            tool.input_schema["properties"]["tags"]["type"],
            json!(["array", "null"])
        );
        assert_eq!(
            tool.input_schema["properties"]["tags"]["items"]["type"],
            "string"
        );

        let serialized = serde_json::to_value(&tool).unwrap();
        assert!(serialized.get("inputSchema").is_some());
    }
}
