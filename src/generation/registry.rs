//! Registry of named models
//!
//! Every schema under `components.schemas` becomes one [`ModelDescriptor`]
//! keyed by its reference key. The registry is built once per run and is
//! read-only afterwards; the renderer resolves `$ref`s through it by key.

use indexmap::IndexMap;
use serde::Serialize;

use crate::generation::SchemaNode;
use crate::generation::utils::mangle;

/// Prefix of every reference key stored in the registry
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Suffix appended to every generated model name
pub const MODEL_SUFFIX: &str = "Model";

/// A named model ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    /// Exact reference key, e.g. `#/components/schemas/Pet`
    pub key: String,
    /// Generated TypeScript name, e.g. `PetModel`
    pub name: String,
    pub schema: SchemaNode,
}

/// Immutable lookup from reference key to model
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    models: IndexMap<String, ModelDescriptor>,
}

impl SchemaRegistry {
    /// Builds the registry from the named-schema section, in declaration order.
    pub fn new(schemas: &IndexMap<String, SchemaNode>) -> Self {
        let models = schemas
            .iter()
            .map(|(name, schema)| {
                let key = format!("{SCHEMA_REF_PREFIX}{name}");
                let descriptor = ModelDescriptor {
                    key: key.clone(),
                    name: Self::model_name(name),
                    schema: schema.clone(),
                };
                (key, descriptor)
            })
            .collect();

        Self { models }
    }

    /// Generated name for a bare model name
    pub fn model_name(name: &str) -> String {
        format!("{}{MODEL_SUFFIX}", mangle(name, false))
    }

    pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
        self.models.get(key)
    }

    /// Generated name of the model behind `key`
    pub fn resolve_name(&self, key: &str) -> Option<&str> {
        self.models.get(key).map(|model| model.name.as_str())
    }

    /// Models in document declaration order
    pub fn models(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
