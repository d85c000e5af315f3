//! TypeScript transpiler backed by swc
//!
//! Lowering runs the swc TypeScript strip pass; declarations come from the
//! isolated-declarations emitter, so every export needs an explicit type.

mod source;

use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

use crate::generation::{GenerationError, Transpiler};

/// Failure to read or rewrite a TypeScript source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranspileError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("declarations need explicit types: {}", .0.join("; "))]
    Declarations(Vec<String>),

    #[error("declarations export {declared:?} but the module exports {runtime:?}")]
    ExportMismatch {
        declared: Vec<String>,
        runtime: Vec<String>,
    },
}

/// [`Transpiler`] backed by swc
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTranspiler;

impl TypeScriptTranspiler {
    pub fn new() -> Self {
        Self
    }
}

impl Transpiler for TypeScriptTranspiler {
    fn lower(&self, file_name: &str, source: &str) -> Result<String, GenerationError> {
        debug!("Lowering {} to JavaScript", file_name);
        source::lower(file_name, source).map_err(|e| transpile_error(file_name, e))
    }

    fn extract_declarations(
        &self,
        file_name: &str,
        source: &str,
    ) -> Result<String, GenerationError> {
        debug!("Extracting declarations from {}", file_name);
        source::declarations(file_name, source).map_err(|e| transpile_error(file_name, e))
    }
}

fn transpile_error(file_name: &str, source: TranspileError) -> GenerationError {
    GenerationError::TranspileError {
        file: file_name.to_string(),
        source,
    }
}

/// Runtime names a module exports, `default` included. Works on both the
/// typed source and its lowered form.
pub fn exported_values(source: &str) -> Result<BTreeSet<String>, TranspileError> {
    source::exported_values(source)
}
