//! Tera-based source renderer
//!
//! Templates get four functions and two filters on top of Tera's builtins:
//!
//! - `get_ref(key)`: model name behind a reference key, or null
//! - `render_schema(schema, depth=0)`: TypeScript type expression for a schema
//! - `is_empty(value)`: true for null, `{}` and `[]`
//! - `if_cond(left, op, right)`: comparison with `== === != !== < <= > >= && ||`
//! - `doc(indent="")`: sanitizes text for a `/** */` block
//! - `ts_key`: quotes property names that are not identifiers

use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as StdError;
use tera::{Context, Tera};
use tracing::debug;

use crate::generation::sanitizers::sanitize_doc_comment;
use crate::generation::utils::property_key;
use crate::generation::{
    GenerationError, RenderContext, RenderHelpers, SchemaNode, SourceRenderer,
};

/// Name the API template is registered under. The `.tera` suffix keeps
/// Tera's HTML autoescaping off.
pub const API_TEMPLATE_NAME: &str = "api.ts.tera";

/// Tera-based renderer for the API module
pub struct TeraTemplateRenderer {
    api_template: String,
}

impl TeraTemplateRenderer {
    pub fn new(api_template: impl Into<String>) -> Self {
        Self {
            api_template: api_template.into(),
        }
    }

    fn build(&self, helpers: &RenderHelpers) -> Result<Tera, GenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(API_TEMPLATE_NAME, &self.api_template)
            .map_err(|e| {
                GenerationError::RenderError(format!("Failed to add template: {}", describe(&e)))
            })?;
        register_helpers(&mut tera, helpers);
        Ok(tera)
    }
}

impl SourceRenderer for TeraTemplateRenderer {
    fn render(
        &self,
        context: &RenderContext,
        helpers: &RenderHelpers,
    ) -> Result<String, GenerationError> {
        let tera = self.build(helpers)?;
        let tera_context = Context::from_value(context.to_value()?).map_err(|e| {
            GenerationError::RenderError(format!("Failed to build template context: {e}"))
        })?;

        let rendered = tera.render(API_TEMPLATE_NAME, &tera_context).map_err(|e| {
            GenerationError::RenderError(format!("Failed to render template: {}", describe(&e)))
        })?;
        debug!(
            "Rendered {} models and {} operations ({} bytes)",
            context.models.len(),
            context.operations.len(),
            rendered.len()
        );

        let mut source = rendered.trim_end().to_string();
        source.push('\n');
        Ok(source)
    }
}

fn register_helpers(tera: &mut Tera, helpers: &RenderHelpers) {
    let lookup = helpers.clone();
    tera.register_function(
        "get_ref",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let key = string_arg(args, "get_ref", "key")?;
            Ok(lookup
                .resolve_reference_name(key)
                .map_or(Value::Null, |name| Value::String(name.to_string())))
        },
    );

    let renderer = helpers.clone();
    tera.register_function(
        "render_schema",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let schema = args
                .get("schema")
                .ok_or_else(|| missing_arg("render_schema", "schema"))?;
            let schema = SchemaNode::from_json(schema).map_err(|e| tera::Error::msg(e.to_string()))?;
            let depth = args.get("depth").and_then(Value::as_u64).unwrap_or(0) as usize;
            Ok(Value::String(renderer.render_schema_at(&schema, depth)))
        },
    );

    tera.register_function(
        "is_empty",
        |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let value = args.get("value").unwrap_or(&Value::Null);
            Ok(Value::Bool(RenderHelpers::is_empty_structure(value)))
        },
    );

    tera.register_function(
        "if_cond",
        |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let operator = string_arg(args, "if_cond", "op")?;
            let left = args.get("left").unwrap_or(&Value::Null);
            let right = args.get("right").unwrap_or(&Value::Null);
            Ok(Value::Bool(RenderHelpers::compare(left, operator, right)))
        },
    );

    tera.register_filter(
        "doc",
        |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
            let indent = args.get("indent").and_then(Value::as_str).unwrap_or("");
            let text = match value {
                Value::Null => String::new(),
                Value::String(text) => sanitize_doc_comment(text, indent),
                other => sanitize_doc_comment(&other.to_string(), indent),
            };
            Ok(Value::String(text))
        },
    );

    tera.register_filter(
        "ts_key",
        |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
            match value.as_str() {
                Some(name) => Ok(Value::String(property_key(name))),
                None => Err(tera::Error::msg(format!(
                    "Filter `ts_key` expects a string, got {value}"
                ))),
            }
        },
    );
}

fn string_arg<'a>(
    args: &'a HashMap<String, Value>,
    function: &str,
    name: &str,
) -> tera::Result<&'a str> {
    args.get(name)
        .ok_or_else(|| missing_arg(function, name))?
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("Function `{function}`: `{name}` must be a string")))
}

fn missing_arg(function: &str, name: &str) -> tera::Error {
    tera::Error::msg(format!("Function `{function}` requires a `{name}` argument"))
}

/// Tera reports the useful part of an error in its source chain
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{OperationTransformer, SchemaRegistry};
    use crate::infrastructure::openapi::OpenApiParser;
    use serde_json::json;
    use std::sync::Arc;

    const API_TEMPLATE: &str = include_str!("../../../templates/typescript/api.ts.tera");

    fn petstore() -> (RenderContext, RenderHelpers) {
        let document = OpenApiParser::new(json!({
            "openapi": "3.0.0",
            "info": { "title": "Petstore", "version": "1.0.0" },
            "paths": {
                "/pets/{petId}": {
                    "get": {
                        "operationId": "getPet",
                        "summary": "Find a pet",
                        "parameters": [
                            { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer" } },
                            { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Pet" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/ping": {
                    "get": { "responses": { "200": { "description": "ok" } } }
                }
            },
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string", "description": "Pet name" }
                        }
                    }
                }
            }
        }))
        .parse()
        .unwrap();

        let registry = Arc::new(SchemaRegistry::new(&document.schemas));
        let operations = OperationTransformer::new(&registry)
            .transform_all(&document)
            .unwrap();
        let models = registry.models().cloned().collect();
        let context = RenderContext::new(models, operations).with_api_info(&document.info);
        (context, RenderHelpers::new(registry))
    }

    #[test]
    fn test_render_api_module() {
        let (context, helpers) = petstore();
        let source = TeraTemplateRenderer::new(API_TEMPLATE)
            .render(&context, &helpers)
            .unwrap();

        assert!(source.starts_with("/* eslint-disable */\n/*\n * Petstore 1.0.0\n"));
        assert!(source.contains(
            "import client from './client'\nimport type { RequestConfig, RequestResponse } from './client'\n\nexport interface PetModel {\n    id: number\n    /** Pet name */\n    name?: string\n}\n"
        ));
        assert!(source.contains(
            "export interface GetPetParams {\n    path: {\n        petId: number\n    }\n    header?: {\n        'X-Trace'?: string\n    }\n}\n"
        ));
        assert!(source.contains("export type GetPetResponse = PetModel\n"));
        assert!(source.contains(
            "/**\n * Find a pet\n */\nexport function getPet(params: GetPetParams, config?: RequestConfig): Promise<RequestResponse<GetPetResponse>> {"
        ));
        assert!(source.contains("        url: `/pets/${params.path.petId}`,\n        method: 'get',\n"));
        assert!(source.contains("            ...params.header,\n"));
        assert!(!source.contains("params: params.query"));

        assert!(source.contains("export type PingGetResponse = any\n"));
        assert!(source.contains(
            "export function pingGet(config?: RequestConfig): Promise<RequestResponse<PingGetResponse>> {"
        ));
        assert!(!source.contains("PingGetParams"));
        assert!(source.ends_with("}\n"));
        assert!(!source.ends_with("\n\n"));
    }

    #[test]
    fn test_helpers_available_to_templates() {
        let (context, helpers) = petstore();
        let template = r##"{{ get_ref(key="#/components/schemas/Pet") }}|{% set less = if_cond(left=1, op="<", right=2) %}{{ less }}|{{ is_empty(value=models) }}|{{ "a*/b" | doc }}|{{ "X-Id" | ts_key }}"##;

        let source = TeraTemplateRenderer::new(template)
            .render(&context, &helpers)
            .unwrap();
        assert_eq!(source, "PetModel|true|false|a*\\/b|'X-Id'\n");
    }

    #[test]
    fn test_render_error_is_reported() {
        let (context, helpers) = petstore();
        let err = TeraTemplateRenderer::new("{{ missing_variable }}")
            .render(&context, &helpers)
            .unwrap_err();
        assert!(matches!(err, GenerationError::RenderError(_)));

        let err = TeraTemplateRenderer::new("{% if %}")
            .render(&context, &helpers)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to add template"));
    }
}
