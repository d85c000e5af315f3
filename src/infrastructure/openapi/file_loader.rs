//! File-based API document loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::parse_document_text;
use super::parser::OpenApiParser;
use crate::generation::{ApiDocument, GenerationError, OpenApiLoader};

/// Loads API documents from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDocument, GenerationError> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        tracing::debug!(path = %path, "Reading API document");

        let content = fs::read_to_string(path)
            .await
            .map_err(GenerationError::IoError)?;

        let value = parse_document_text(&content, path, None)?;
        OpenApiParser::new(value).parse()
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}
