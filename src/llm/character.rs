/// Generated character and its output schema

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name under which the schema is registered with the API
pub const SCHEMA_NAME: &str = "character";

/// A character as returned by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedCharacter {
    pub name: String,
    pub description: String,
}

impl GeneratedCharacter {
    /// Parse structured output text. None if it does not match the schema.
    pub fn from_output(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(character) => Some(character),
            Err(e) => {
                tracing::warn!(error = %e, "generated output did not match the character schema");
                None
            }
        }
    }

    /// Note filename derived from the generated name
    pub fn file_name(&self) -> String {
        format!("{}.md", self.name)
    }
}

/// JSON schema the API output is constrained to
pub fn character_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" }
        },
        "required": ["name", "description"],
        "additionalProperties": false
    })
}
