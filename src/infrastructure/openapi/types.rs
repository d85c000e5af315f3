//! Typed view of the OpenAPI document subset consumed by the generator

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::generation::{GenerationError, SchemaNode};

/// A parsed API document
#[derive(Debug, Clone, Default)]
pub struct ApiDocument {
    /// Value of the `openapi` (or `swagger`) field, if any
    pub version: Option<String>,
    pub info: ApiInfo,
    /// Path items in document order
    pub paths: Vec<PathItem>,
    /// `components.schemas` in document order
    pub schemas: IndexMap<String, SchemaNode>,
}

impl ApiDocument {
    /// Iterates `(path, operation)` pairs in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.paths.iter().flat_map(|item| {
            item.operations
                .iter()
                .map(move |operation| (item.path.as_str(), operation))
        })
    }
}

/// API metadata from the `info` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    pub description: Option<String>,
}

/// One entry of `paths`
#[derive(Debug, Clone)]
pub struct PathItem {
    pub path: String,
    pub operations: Vec<Operation>,
}

/// HTTP methods that may key an operation inside a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Get all HTTP methods as an array
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::all()
            .iter()
            .copied()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenerationError::LoadError(format!("Unknown HTTP method: {s}")))
    }
}

/// One operation of a path item, with `$ref`s already resolved and
/// path-level parameters merged in
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Raw responses keyed by status code string
    pub responses: IndexMap<String, Value>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
        }
    }
}

/// Operation parameter as declared in the document
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    #[serde(default = "SchemaNode::any")]
    pub schema: SchemaNode,
}

/// Request body keyed by MIME type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Response entry of the `responses` map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Content of one MIME type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_round_trip() {
        for method in HttpMethod::all() {
            assert_eq!(method.to_string().parse::<HttpMethod>().unwrap(), *method);
        }
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("parameters".parse::<HttpMethod>().is_err());
        assert!("summary".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_parameter_defaults() {
        let parameter: Parameter = serde_json::from_value(serde_json::json!({
            "name": "limit",
            "in": "query"
        }))
        .unwrap();

        assert_eq!(parameter.location, ParameterLocation::Query);
        assert!(!parameter.required);
        assert_eq!(parameter.schema, SchemaNode::any());
    }
}
