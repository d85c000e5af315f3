//! Composite loader that picks a loading strategy per source

use async_trait::async_trait;
use url::Url;

use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{ApiDocument, GenerationError, OpenApiLoader};

/// Dispatches HTTP(S) URLs to the HTTP loader and paths or `file:` URLs to the file loader
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiDocument, GenerationError> {
        // Relative and absolute paths have no scheme and fail to parse
        let url = match Url::parse(source) {
            Ok(url) => url,
            Err(_) => {
                tracing::debug!(source = %source, "Using file loader");
                return self.file.load(source).await;
            }
        };

        match url.scheme() {
            "http" | "https" => {
                tracing::debug!(source = %source, "Using HTTP loader");
                self.http.load(source).await
            }
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    GenerationError::LoadError(format!("Invalid file URL: {source}"))
                })?;
                tracing::debug!(path = %path.display(), "Using file loader");
                self.file.load(&path.display().to_string()).await
            }
            // Windows drive letters parse as one-letter schemes
            scheme if scheme.len() == 1 => self.file.load(source).await,
            scheme => Err(GenerationError::LoadError(format!(
                "Unsupported URL scheme '{scheme}' in {source}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "openapi": "3.0.0",
        "info": { "title": "Local", "version": "1" },
        "paths": {}
    }"#;

    #[tokio::test]
    async fn test_loads_plain_path_and_file_url() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("openapi.json");
        fs::write(&path, DOCUMENT).unwrap();
        let loader = CompositeOpenApiLoader::new().unwrap();

        let from_path = loader.load(&path.display().to_string()).await.unwrap();
        assert_eq!(from_path.info.title, "Local");

        let file_url = Url::from_file_path(&path).unwrap();
        let from_url = loader.load(file_url.as_str()).await.unwrap();
        assert_eq!(from_url.info.title, "Local");
    }

    #[tokio::test]
    async fn test_rejects_unsupported_scheme() {
        let loader = CompositeOpenApiLoader::new().unwrap();

        match loader.load("ftp://example.com/openapi.json").await.unwrap_err() {
            GenerationError::LoadError(msg) => assert!(msg.contains("Unsupported URL scheme 'ftp'")),
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_relative_path_reaches_file_loader() {
        let loader = CompositeOpenApiLoader::new().unwrap();
        let err = loader.load("does/not/exist.json").await.unwrap_err();

        assert!(matches!(err, GenerationError::IoError(_)));
    }
}
