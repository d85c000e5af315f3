//! Error types for the generation domain

use thiserror::Error;

use crate::infrastructure::typescript::TranspileError;

/// Errors that can occur during client generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("OpenAPI loading error: {0}")]
    LoadError(String),

    #[error("Unsupported document shape in {method} {path}: {reason}")]
    DocumentShape {
        path: String,
        method: String,
        reason: String,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Transpile error in {file}: {source}")]
    TranspileError {
        file: String,
        #[source]
        source: TranspileError,
    },

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn document_shape(
        path: impl Into<String>,
        method: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DocumentShape {
            path: path.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }
}
