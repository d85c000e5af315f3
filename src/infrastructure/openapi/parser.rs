//! OpenAPI document parser
//!
//! Turns the raw JSON value of a document into an [`ApiDocument`]:
//! - `$ref` resolution for parameters, request bodies and responses
//! - merging of path-level parameters into each operation
//! - conversion of every schema into a [`SchemaNode`]
//!
//! Schema `$ref`s are deliberately left in place; they are resolved by name at
//! render time through the schema registry.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use super::types::{ApiDocument, ApiInfo, HttpMethod, Operation, Parameter, PathItem, RequestBody};
use crate::generation::{GenerationError, SchemaNode};

/// Upper bound on `$ref` -> `$ref` hops before a reference is considered cyclic
const MAX_REF_HOPS: usize = 32;

/// OpenAPI document parser
pub struct OpenApiParser {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse the document into the typed model
    pub fn parse(&self) -> Result<ApiDocument, GenerationError> {
        let root = self.json.as_object().ok_or_else(|| {
            GenerationError::LoadError("API document must be a JSON object".to_string())
        })?;

        let version = root
            .get("openapi")
            .or_else(|| root.get("swagger"))
            .and_then(JsonValue::as_str)
            .map(String::from);

        let info = match root.get("info") {
            Some(info) => serde_json::from_value::<ApiInfo>(info.clone())?,
            None => ApiInfo::default(),
        };

        let schemas = self.parse_schemas()?;
        let paths = self.parse_paths()?;

        tracing::debug!(
            schemas = schemas.len(),
            operations = paths.iter().map(|item| item.operations.len()).sum::<usize>(),
            "Parsed API document"
        );

        Ok(ApiDocument {
            version,
            info,
            paths,
            schemas,
        })
    }

    /// Parse `components.schemas`, preserving declaration order
    fn parse_schemas(&self) -> Result<IndexMap<String, SchemaNode>, GenerationError> {
        let Some(schemas) = self
            .json
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
        else {
            return Ok(IndexMap::new());
        };

        schemas
            .iter()
            .map(|(name, schema)| {
                SchemaNode::from_json(schema)
                    .map(|node| (name.clone(), node))
                    .map_err(|e| {
                        GenerationError::InvalidSchema(format!("components.schemas.{name}: {e}"))
                    })
            })
            .collect()
    }

    fn parse_paths(&self) -> Result<Vec<PathItem>, GenerationError> {
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            return Ok(Vec::new());
        };

        let mut items = Vec::with_capacity(paths.len());
        for (path, path_item) in paths {
            let path_item = self.resolve(path_item).map_err(|reason| {
                GenerationError::document_shape(path.as_str(), "*", reason)
            })?;
            let Some(path_item) = path_item.as_object() else {
                return Err(GenerationError::document_shape(
                    path.as_str(),
                    "*",
                    "path item must be an object",
                ));
            };

            let shared_parameters = self.extract_parameters(path_item, path, "*")?;

            let mut operations = Vec::new();
            for (key, method_item) in path_item {
                // `parameters`, `summary`, `servers` and extensions share the map
                let Ok(method) = key.parse::<HttpMethod>() else {
                    continue;
                };
                let Some(method_item) = method_item.as_object() else {
                    return Err(GenerationError::document_shape(
                        path.as_str(),
                        method.as_str(),
                        "operation must be an object",
                    ));
                };
                operations.push(self.build_operation(
                    path,
                    method,
                    &shared_parameters,
                    method_item,
                )?);
            }

            items.push(PathItem {
                path: path.clone(),
                operations,
            });
        }

        Ok(items)
    }

    /// Build an Operation from path, method, and method item
    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        shared_parameters: &[Parameter],
        method_item: &Map<String, JsonValue>,
    ) -> Result<Operation, GenerationError> {
        let text = |key: &str| {
            method_item
                .get(key)
                .and_then(JsonValue::as_str)
                .map(String::from)
        };

        // Operation-level parameters override path-level ones with the same name and location
        let mut parameters = shared_parameters.to_vec();
        for parameter in self.extract_parameters(method_item, path, method.as_str())? {
            match parameters
                .iter_mut()
                .find(|p| p.name == parameter.name && p.location == parameter.location)
            {
                Some(existing) => *existing = parameter,
                None => parameters.push(parameter),
            }
        }

        let request_body = method_item
            .get("requestBody")
            .map(|body| self.parse_component::<RequestBody>(body, path, method.as_str()))
            .transpose()?;

        let mut responses = IndexMap::new();
        if let Some(raw) = method_item.get("responses").and_then(JsonValue::as_object) {
            for (status, response) in raw {
                let response = self.resolve(response).map_err(|reason| {
                    GenerationError::document_shape(path, method.as_str(), reason)
                })?;
                responses.insert(status.clone(), response.clone());
            }
        }

        let tags = method_item
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Operation {
            method,
            operation_id: text("operationId"),
            summary: text("summary"),
            description: text("description"),
            tags,
            deprecated: method_item
                .get("deprecated")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            parameters,
            request_body,
            responses,
        })
    }

    /// Extracts the `parameters` list of a path item or operation, resolving any $ref
    fn extract_parameters(
        &self,
        item: &Map<String, JsonValue>,
        path: &str,
        method: &str,
    ) -> Result<Vec<Parameter>, GenerationError> {
        let Some(raw) = item.get("parameters") else {
            return Ok(Vec::new());
        };
        let raw = raw.as_array().ok_or_else(|| {
            GenerationError::document_shape(path, method, "parameters must be a list")
        })?;

        raw.iter()
            .map(|parameter| self.parse_component::<Parameter>(parameter, path, method))
            .collect()
    }

    /// Resolves `value` if it is a `$ref` and deserializes the target
    fn parse_component<T: DeserializeOwned>(
        &self,
        value: &JsonValue,
        path: &str,
        method: &str,
    ) -> Result<T, GenerationError> {
        let resolved = self
            .resolve(value)
            .map_err(|reason| GenerationError::document_shape(path, method, reason))?;
        serde_json::from_value(resolved.clone())
            .map_err(|e| GenerationError::document_shape(path, method, e.to_string()))
    }

    /// Follows `$ref` chains until a non-reference value is reached
    fn resolve<'a>(&'a self, value: &'a JsonValue) -> Result<&'a JsonValue, String> {
        let mut current = value;
        for _ in 0..MAX_REF_HOPS {
            match current.get("$ref").and_then(JsonValue::as_str) {
                Some(ref_str) => current = self.resolve_ref(ref_str)?,
                None => return Ok(current),
            }
        }
        Err(format!("reference chain starting at {value} is cyclic"))
    }

    /// Resolves one local JSON pointer reference (e.g. "#/components/parameters/Limit")
    fn resolve_ref(&self, ref_str: &str) -> Result<&JsonValue, String> {
        match ref_str.strip_prefix('#') {
            Some(pointer) => self
                .json
                .pointer(pointer)
                .ok_or_else(|| format!("unable to resolve reference {ref_str}")),
            None => Err(format!("external references are not supported: {ref_str}")),
        }
    }
}
