//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output language mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    /// Typed TypeScript source (`api.ts`)
    #[default]
    Ts,
    /// Lowered JavaScript plus declarations (`api.js` + `api.d.ts`)
    Js,
}

impl OutputLanguage {
    /// Extension of the runtime files emitted in this mode
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputLanguage::Ts => "ts",
            OutputLanguage::Js => "js",
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, OutputLanguage::Js)
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_extension())
    }
}

impl FromStr for OutputLanguage {
    type Err = crate::generation::GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ts" | "typescript" => Ok(OutputLanguage::Ts),
            "js" | "javascript" => Ok(OutputLanguage::Js),
            _ => Err(crate::generation::GenerationError::InvalidConfiguration(
                format!("unsupported output language '{s}', expected 'ts' or 'js'"),
            )),
        }
    }
}

/// Options for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub language: OutputLanguage,
    pub output_dir: PathBuf,
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// What an emission run did to the output directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionReport {
    pub written: Vec<PathBuf>,
    /// Runtime wrapper paths left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    /// Intermediate `.ts` inputs removed after lowering
    pub removed: Vec<PathBuf>,
}

/// Result of generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub models: usize,
    pub operations: usize,
    pub emission: EmissionReport,
}

// Re-export document types from the infrastructure module
pub use crate::infrastructure::openapi::{
    ApiDocument, ApiInfo, HttpMethod, MediaType, Operation, Parameter, ParameterLocation,
    PathItem, RequestBody, Response,
};
