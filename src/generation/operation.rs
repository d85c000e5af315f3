//! Operation normalization
//!
//! [`OperationTransformer`] turns one `(path, method, operation)` triple of the
//! document into an [`OperationDescriptor`], the render-ready view of an
//! endpoint: grouped parameters, the adopted request body, the `200` JSON
//! response and the derived flags the templates branch on.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::generation::flattener::flatten_query_parameters;
use crate::generation::utils::mangle;
use crate::generation::{GenerationError, SchemaKind, SchemaNode, SchemaRegistry};
use crate::infrastructure::openapi::{
    ApiDocument, HttpMethod, Operation, Parameter, ParameterLocation, Response,
};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";
pub const SUCCESS_STATUS: &str = "200";

static PATH_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.*?)\}").expect("valid path token regex"));

/// A parameter of one location group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub schema: SchemaNode,
}

impl From<Parameter> for ParameterDescriptor {
    fn from(parameter: Parameter) -> Self {
        Self {
            name: parameter.name,
            location: parameter.location,
            required: parameter.required,
            description: parameter.description,
            schema: parameter.schema,
        }
    }
}

/// Content type adopted for the request body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BodyContentType {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "multipart/form-data")]
    Multipart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestBodyDescriptor {
    pub content_type: BodyContentType,
    pub schema: Option<SchemaNode>,
}

/// The `200` response as seen by the generated function
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JsonResponse {
    pub description: String,
    pub schema: Option<SchemaNode>,
}

/// Render-ready view of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Function name, lower camel case
    pub name: String,
    /// Upper camel case name used for the `Params`/`Response` types
    pub display_name: String,
    pub method: HttpMethod,
    /// Path template with `{x}` rewritten to `${params.path.x}`
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub path_params: Vec<ParameterDescriptor>,
    pub query_params: Vec<ParameterDescriptor>,
    pub headers: Vec<ParameterDescriptor>,
    pub request_body: RequestBodyDescriptor,
    pub has_params: bool,
    pub query_params_required: bool,
    pub headers_required: bool,
    pub request_body_required: bool,
    pub responses: IndexMap<String, Value>,
    pub json_response: JsonResponse,
}

/// Rewrites every `{name}` of a path template into `${params.path.name}`.
pub fn rewrite_path_template(path: &str) -> String {
    PATH_TOKEN
        .replace_all(path, |caps: &Captures| format!("${{params.path.{}}}", &caps[1]))
        .into_owned()
}

/// Builds operation descriptors against a read-only schema registry
pub struct OperationTransformer<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> OperationTransformer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Transforms every operation of the document, in document order.
    pub fn transform_all(
        &self,
        document: &ApiDocument,
    ) -> Result<Vec<OperationDescriptor>, GenerationError> {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::new();

        for (path, operation) in document.operations() {
            let descriptor = self.transform(path, operation)?;
            if !seen.insert(descriptor.name.clone()) {
                tracing::warn!(
                    operation = %descriptor.name,
                    path = %path,
                    method = %operation.method,
                    "Duplicate operation name; generated functions will collide"
                );
            }
            descriptors.push(descriptor);
        }

        Ok(descriptors)
    }

    /// Transforms one operation.
    pub fn transform(
        &self,
        path: &str,
        operation: &Operation,
    ) -> Result<OperationDescriptor, GenerationError> {
        let method = operation.method;
        let name = Self::operation_name(path, operation)?;
        let display_name = mangle(&name, false);
        tracing::debug!(operation = %name, method = %method, path = %path, "Transforming operation");

        let mut path_params = Vec::new();
        let mut query_params = Vec::new();
        let mut headers = Vec::new();
        for parameter in &operation.parameters {
            let descriptor = ParameterDescriptor::from(parameter.clone());
            match parameter.location {
                ParameterLocation::Path => path_params.push(descriptor),
                ParameterLocation::Query => query_params.push(descriptor),
                ParameterLocation::Header => headers.push(descriptor),
                ParameterLocation::Cookie => {
                    tracing::debug!(parameter = %parameter.name, "Skipping cookie parameter");
                }
            }
        }
        let query_params = flatten_query_parameters(query_params);

        let request_body = Self::request_body(operation);
        let json_response = Self::json_response(path, operation)?;

        for schema in path_params
            .iter()
            .chain(&query_params)
            .chain(&headers)
            .map(|parameter| &parameter.schema)
            .chain(request_body.schema.as_ref())
            .chain(json_response.schema.as_ref())
        {
            self.check_references(schema, &name);
        }

        let has_params = !path_params.is_empty()
            || !query_params.is_empty()
            || !headers.is_empty()
            || request_body.schema.is_some();
        let query_params_required = query_params.iter().any(|p| p.required);
        let headers_required = headers.iter().any(|p| p.required);

        Ok(OperationDescriptor {
            name,
            display_name,
            method,
            path: rewrite_path_template(path),
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            tags: operation.tags.clone(),
            deprecated: operation.deprecated,
            path_params,
            query_params,
            headers,
            request_body,
            has_params,
            query_params_required,
            headers_required,
            request_body_required: true,
            responses: operation.responses.clone(),
            json_response,
        })
    }

    /// `operationId` when present, otherwise `{path}/{method}`, lower camel cased
    fn operation_name(path: &str, operation: &Operation) -> Result<String, GenerationError> {
        let name = match operation.operation_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => mangle(id, true),
            None => mangle(&format!("{path}/{}", operation.method), true),
        };

        if name.is_empty() {
            return Err(GenerationError::document_shape(
                path,
                operation.method.as_str(),
                "operation name reduces to an empty identifier",
            ));
        }
        Ok(name)
    }

    /// JSON is adopted first and multipart overwrites it, so multipart wins.
    fn request_body(operation: &Operation) -> RequestBodyDescriptor {
        let mut descriptor = RequestBodyDescriptor::default();
        let Some(body) = &operation.request_body else {
            return descriptor;
        };

        if let Some(json) = body.content.get(JSON_CONTENT_TYPE) {
            descriptor = RequestBodyDescriptor {
                content_type: BodyContentType::Json,
                schema: json.schema.clone(),
            };
        }
        if let Some(multipart) = body.content.get(MULTIPART_CONTENT_TYPE) {
            descriptor = RequestBodyDescriptor {
                content_type: BodyContentType::Multipart,
                schema: multipart.schema.clone(),
            };
        }
        descriptor
    }

    fn json_response(path: &str, operation: &Operation) -> Result<JsonResponse, GenerationError> {
        let method = operation.method.as_str();
        let raw = operation.responses.get(SUCCESS_STATUS).ok_or_else(|| {
            GenerationError::document_shape(path, method, "missing a \"200\" response")
        })?;
        let response: Response = serde_json::from_value(raw.clone()).map_err(|e| {
            GenerationError::document_shape(path, method, format!("invalid \"200\" response: {e}"))
        })?;

        Ok(JsonResponse {
            description: response.description,
            schema: response
                .content
                .get(JSON_CONTENT_TYPE)
                .and_then(|media| media.schema.clone()),
        })
    }

    /// Logs references the registry cannot resolve; they render as `any`.
    fn check_references(&self, schema: &SchemaNode, operation: &str) {
        match &schema.kind {
            SchemaKind::Reference(key) => {
                if self.registry.get(key).is_none() {
                    tracing::warn!(operation = %operation, reference = %key, "Unresolved schema reference");
                }
            }
            SchemaKind::Object { properties, .. } => {
                for property in properties.values() {
                    self.check_references(property, operation);
                }
            }
            SchemaKind::Array { items } => self.check_references(items, operation),
            SchemaKind::Union(members) | SchemaKind::Intersection(members) => {
                for member in members {
                    self.check_references(member, operation);
                }
            }
            SchemaKind::Primitive(_) => {}
        }
    }
}
