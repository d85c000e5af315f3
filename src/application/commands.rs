//! Data Transfer Objects for application layer

use crate::config::GeneratorConfig;
use crate::generation::{GenerationOptions, GenerationResult, OutputLanguage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Request to generate a TypeScript client
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateClientRequest {
    /// URL or file path of the API document
    pub source: String,
    pub language: OutputLanguage,
    pub output_dir: PathBuf,
    /// Runtime wrapper text written when no wrapper exists yet
    pub runtime_wrapper: String,
}

impl GenerateClientRequest {
    pub fn from_config(config: &GeneratorConfig, runtime_wrapper: impl Into<String>) -> Self {
        Self {
            source: config.source_url.clone(),
            language: config.output_language,
            output_dir: config.output_dir.clone(),
            runtime_wrapper: runtime_wrapper.into(),
        }
    }

    pub fn validate(&self) -> Result<(), crate::application::ValidationError> {
        if self.source.trim().is_empty() {
            return Err(crate::application::ValidationError::MissingField(
                "source URL".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(crate::application::ValidationError::MissingField(
                "output directory".to_string(),
            ));
        }

        Ok(())
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            language: self.language,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Response from client generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateClientResponse {
    pub models: usize,
    pub operations: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub output_path: PathBuf,
}

impl GenerateClientResponse {
    pub fn new(result: GenerationResult, output_path: PathBuf) -> Self {
        Self {
            models: result.models,
            operations: result.operations,
            written: result.emission.written,
            skipped: result.emission.skipped,
            removed: result.emission.removed,
            output_path,
        }
    }
}
