//! Render context handed to the source renderer

use serde_json::{Map, Value as JsonValue, json};
use std::collections::BTreeMap;

use crate::generation::{ApiInfo, GenerationError, ModelDescriptor, OperationDescriptor};

/// Data available to templates: the model list, the operation list and a
/// set of named scalar variables
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub models: Vec<ModelDescriptor>,
    pub operations: Vec<OperationDescriptor>,
    pub variables: BTreeMap<String, JsonValue>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(models: Vec<ModelDescriptor>, operations: Vec<OperationDescriptor>) -> Self {
        Self {
            models,
            operations,
            variables: BTreeMap::new(),
        }
    }

    /// Adds the standard header variables: generator name/version and API info
    pub fn with_api_info(mut self, info: &ApiInfo) -> Self {
        self.add_variable(
            "generator",
            json!(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
        );
        self.add_variable("api_title", json!(info.title));
        self.add_variable("api_version", json!(info.version));
        self.add_variable("api_description", json!(info.description));
        self
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    /// Check if a variable exists
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Flattens the context into one JSON object: `models`, `operations`
    /// and every variable at the top level.
    pub fn to_value(&self) -> Result<JsonValue, GenerationError> {
        let mut data = Map::new();
        for (key, value) in &self.variables {
            data.insert(key.clone(), value.clone());
        }
        data.insert("models".to_string(), serde_json::to_value(&self.models)?);
        data.insert(
            "operations".to_string(),
            serde_json::to_value(&self.operations)?,
        );
        Ok(JsonValue::Object(data))
    }
}
