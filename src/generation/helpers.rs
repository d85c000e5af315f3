//! Query functions exposed to the source renderer
//!
//! Templates cannot walk recursive schemas or look models up by themselves,
//! so the renderer is handed a [`RenderHelpers`] bound to the schema registry.
//! Every function here is pure.

use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::generation::sanitizers::sanitize_doc_comment;
use crate::generation::utils::property_key;
use crate::generation::{PrimitiveType, SchemaKind, SchemaNode, SchemaRegistry};

const INDENT: &str = "    ";

/// Type rendered for references the registry does not know
const UNRESOLVED_TYPE: &str = "any";

/// Helper functions bound to one registry
#[derive(Debug, Clone)]
pub struct RenderHelpers {
    registry: Arc<SchemaRegistry>,
}

impl RenderHelpers {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Generated model name behind a reference key
    pub fn resolve_reference_name(&self, key: &str) -> Option<&str> {
        self.registry.resolve_name(key)
    }

    /// Renders a schema as a TypeScript type expression.
    ///
    /// References render as model names and are never expanded, so cyclic
    /// schema graphs terminate.
    pub fn render_nested_schema(&self, schema: &SchemaNode) -> String {
        self.render_schema_at(schema, 0)
    }

    /// Same as [`render_nested_schema`](Self::render_nested_schema) for a type
    /// that starts `depth` indentation levels deep.
    pub fn render_schema_at(&self, schema: &SchemaNode, depth: usize) -> String {
        match &schema.kind {
            SchemaKind::Primitive(primitive) => primitive_type(*primitive).to_string(),
            SchemaKind::Reference(key) => self
                .resolve_reference_name(key)
                .unwrap_or(UNRESOLVED_TYPE)
                .to_string(),
            SchemaKind::Array { items } => {
                format!("Array<{}>", self.render_schema_at(items, depth))
            }
            SchemaKind::Object { properties, .. } if properties.is_empty() => {
                "Record<string, any>".to_string()
            }
            SchemaKind::Object {
                properties,
                required,
            } => {
                let inner = INDENT.repeat(depth + 1);
                let mut rendered = String::from("{\n");
                for (name, property) in properties {
                    let doc = property
                        .description
                        .as_deref()
                        .map(|text| sanitize_doc_comment(text, &inner))
                        .unwrap_or_default();
                    if !doc.is_empty() {
                        rendered.push_str(&format!("{inner}/** {doc} */\n"));
                    }
                    let optional = if required.contains(name) { "" } else { "?" };
                    rendered.push_str(&format!(
                        "{inner}{}{optional}: {}\n",
                        property_key(name),
                        self.render_schema_at(property, depth + 1)
                    ));
                }
                rendered.push_str(&INDENT.repeat(depth));
                rendered.push('}');
                rendered
            }
            SchemaKind::Union(members) => self.join_members(members, " | ", depth, |_| false),
            SchemaKind::Intersection(members) => self.join_members(members, " & ", depth, |member| {
                matches!(member.kind, SchemaKind::Union(_))
            }),
        }
    }

    fn join_members(
        &self,
        members: &[SchemaNode],
        separator: &str,
        depth: usize,
        needs_parens: impl Fn(&SchemaNode) -> bool,
    ) -> String {
        if members.is_empty() {
            return UNRESOLVED_TYPE.to_string();
        }
        members
            .iter()
            .map(|member| {
                let rendered = self.render_schema_at(member, depth);
                if needs_parens(member) {
                    format!("({rendered})")
                } else {
                    rendered
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// True for an absent value or an empty object or list
    pub fn is_empty_structure(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(object) => object.is_empty(),
            Value::Array(array) => array.is_empty(),
            _ => false,
        }
    }

    /// Compares two template values with one of
    /// `== === != !== < <= > >= && ||`. Unknown operators yield false.
    pub fn compare(left: &Value, operator: &str, right: &Value) -> bool {
        match operator {
            "==" => loose_eq(left, right),
            "===" => left == right,
            "!=" => !loose_eq(left, right),
            "!==" => left != right,
            "<" => order(left, right) == Some(Ordering::Less),
            "<=" => matches!(order(left, right), Some(Ordering::Less | Ordering::Equal)),
            ">" => order(left, right) == Some(Ordering::Greater),
            ">=" => matches!(order(left, right), Some(Ordering::Greater | Ordering::Equal)),
            "&&" => truthy(left) && truthy(right),
            "||" => truthy(left) || truthy(right),
            _ => false,
        }
    }
}

fn primitive_type(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::String => "string",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::Number | PrimitiveType::Integer => "number",
        PrimitiveType::Null => "null",
        PrimitiveType::Any => "any",
    }
}

/// Equality that lets numbers match their string spelling
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.trim().parse::<f64>().ok() == n.as_f64()
        }
        _ => left == right,
    }
}

fn order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
