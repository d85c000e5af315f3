//! Schema model for API documents
//!
//! [`SchemaNode`] is the single representation of a schema used across the
//! generator: the registry stores it, the operation transformer and the query
//! flattener rewrite it, and the renderer turns it into TypeScript types.
//! References are kept as keys and never expanded, so self-referencing and
//! mutually recursive schemas are representable without cycles in memory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use crate::generation::GenerationError;

/// Primitive type tags understood by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Boolean,
    Number,
    Integer,
    Null,
    Any,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Any => "any",
        }
    }

    /// Parses an OpenAPI `type` name. Unknown names are not primitives.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveType::String),
            "boolean" => Some(PrimitiveType::Boolean),
            "number" => Some(PrimitiveType::Number),
            "integer" => Some(PrimitiveType::Integer),
            "null" => Some(PrimitiveType::Null),
            "any" => Some(PrimitiveType::Any),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a schema. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: Vec<String>,
    },
    Array {
        items: Box<SchemaNode>,
    },
    Primitive(PrimitiveType),
    /// Key of another schema, e.g. `#/components/schemas/Pet`
    Reference(String),
    /// `oneOf` (and `anyOf`)
    Union(Vec<SchemaNode>),
    /// `allOf`
    Intersection(Vec<SchemaNode>),
}

/// A schema with its optional human description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::new(SchemaKind::Primitive(primitive))
    }

    pub fn any() -> Self {
        Self::primitive(PrimitiveType::Any)
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveType::String)
    }

    pub fn array_of(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    pub fn reference(key: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference(key.into()))
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, SchemaKind::Primitive(PrimitiveType::String))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object { .. })
    }

    /// Parses a JSON schema object into a [`SchemaNode`].
    pub fn from_json(value: &Value) -> Result<Self, GenerationError> {
        let object = match value {
            Value::Object(object) => object,
            Value::Bool(true) | Value::Null => return Ok(Self::any()),
            other => {
                return Err(GenerationError::InvalidSchema(format!(
                    "expected a schema object, found {other}"
                )));
            }
        };

        let description = object
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let kind = Self::parse_kind(object)?;
        Ok(Self { kind, description })
    }

    fn parse_kind(object: &Map<String, Value>) -> Result<SchemaKind, GenerationError> {
        if let Some(reference) = object.get("$ref") {
            let key = reference.as_str().ok_or_else(|| {
                GenerationError::InvalidSchema(format!("$ref must be a string, found {reference}"))
            })?;
            return Ok(SchemaKind::Reference(key.to_string()));
        }

        if let Some(members) = object.get("oneOf").or_else(|| object.get("anyOf")) {
            return Ok(SchemaKind::Union(Self::parse_members(members)?));
        }

        if let Some(members) = object.get("allOf") {
            return Ok(SchemaKind::Intersection(Self::parse_members(members)?));
        }

        match object.get("type") {
            Some(Value::String(type_name)) => Self::parse_typed(type_name, object),
            Some(Value::Array(type_names)) => {
                let mut members = Vec::with_capacity(type_names.len());
                for type_name in type_names {
                    let type_name = type_name.as_str().ok_or_else(|| {
                        GenerationError::InvalidSchema(format!(
                            "type list entries must be strings, found {type_name}"
                        ))
                    })?;
                    members.push(SchemaNode::new(Self::parse_typed(type_name, object)?));
                }
                Ok(match members.len() {
                    0 => SchemaKind::Primitive(PrimitiveType::Any),
                    1 => members.remove(0).kind,
                    _ => SchemaKind::Union(members),
                })
            }
            Some(other) => Err(GenerationError::InvalidSchema(format!(
                "type must be a string or a list of strings, found {other}"
            ))),
            None if object.contains_key("properties") => Self::parse_typed("object", object),
            None if object.contains_key("items") => Self::parse_typed("array", object),
            None => Ok(SchemaKind::Primitive(PrimitiveType::Any)),
        }
    }

    fn parse_typed(type_name: &str, object: &Map<String, Value>) -> Result<SchemaKind, GenerationError> {
        match type_name {
            "object" => {
                let mut properties = IndexMap::new();
                if let Some(Value::Object(raw)) = object.get("properties") {
                    for (name, schema) in raw {
                        properties.insert(name.clone(), Self::from_json(schema)?);
                    }
                }
                let required = object
                    .get("required")
                    .and_then(Value::as_array)
                    .map(|names| {
                        names
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(SchemaKind::Object {
                    properties,
                    required,
                })
            }
            "array" => {
                let items = match object.get("items") {
                    Some(items) => Self::from_json(items)?,
                    None => Self::any(),
                };
                Ok(SchemaKind::Array {
                    items: Box::new(items),
                })
            }
            other => Ok(SchemaKind::Primitive(
                PrimitiveType::from_type_name(other).unwrap_or(PrimitiveType::Any),
            )),
        }
    }

    fn parse_members(members: &Value) -> Result<Vec<SchemaNode>, GenerationError> {
        let members = members.as_array().ok_or_else(|| {
            GenerationError::InvalidSchema(format!("composition must be a list, found {members}"))
        })?;
        members.iter().map(Self::from_json).collect()
    }

    /// Serializes the node back into OpenAPI schema JSON.
    pub fn to_json(&self) -> Value {
        let mut value = match &self.kind {
            SchemaKind::Object {
                properties,
                required,
            } => {
                let properties: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json()))
                    .collect();
                let mut object = json!({ "type": "object", "properties": properties });
                if !required.is_empty() {
                    object["required"] = json!(required);
                }
                object
            }
            SchemaKind::Array { items } => json!({ "type": "array", "items": items.to_json() }),
            SchemaKind::Primitive(primitive) => json!({ "type": primitive.as_str() }),
            SchemaKind::Reference(key) => json!({ "$ref": key }),
            SchemaKind::Union(members) => {
                json!({ "oneOf": members.iter().map(SchemaNode::to_json).collect::<Vec<_>>() })
            }
            SchemaKind::Intersection(members) => {
                json!({ "allOf": members.iter().map(SchemaNode::to_json).collect::<Vec<_>>() })
            }
        };

        if let (Some(description), Value::Object(object)) = (&self.description, &mut value) {
            object.insert("description".to_string(), json!(description));
        }
        value
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = GenerationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl From<SchemaNode> for Value {
    fn from(schema: SchemaNode) -> Self {
        schema.to_json()
    }
}
