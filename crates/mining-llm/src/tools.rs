//! Tool definition types
//!
//! Tools are described to the model inside the prompt text rather than
//! through a function-calling API, so a definition only needs to render
//! itself as a catalog line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition: name, description and JSON schema of its input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name, as the model must write it after `Action:`
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Create a definition whose input is a single required string field
    pub fn with_string_input(
        name: impl Into<String>,
        description: impl Into<String>,
        field: &str,
        field_description: &str,
    ) -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert(field.to_string(), schema::string(field_description));
        let schema = schema::object(Value::Object(properties), vec![field]);
        Self::new(name, description, schema)
    }

    /// Names of the input fields, in schema order
    pub fn input_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// One catalog line, e.g. `stock_data: Get financial data (input: symbol)`
    pub fn catalog_line(&self) -> String {
        let fields = self.input_fields();
        if fields.is_empty() {
            format!("{}: {}", self.name, self.description)
        } else {
            format!(
                "{}: {} (input: {})",
                self.name,
                self.description,
                fields.join(", ")
            )
        }
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }
}
