//! API document loading implementations

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use parser::OpenApiParser;
pub use types::*;

use serde_json::Value as JsonValue;

use crate::generation::GenerationError;

/// Parses document text as JSON or YAML.
///
/// The content type (when known) or the source extension decides the format;
/// otherwise JSON is tried first, then YAML.
pub(crate) fn parse_document_text(
    content: &str,
    source: &str,
    content_type: Option<&str>,
) -> Result<JsonValue, GenerationError> {
    let content_type = content_type.unwrap_or("");

    if content_type.contains("json") || source.ends_with(".json") {
        serde_json::from_str(content).map_err(GenerationError::SerializationError)
    } else if content_type.contains("yaml") || source.ends_with(".yaml") || source.ends_with(".yml")
    {
        serde_yaml::from_str(content)
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}")))
    } else {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse API document: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::OpenApiLoader;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT_JSON: &str = r#"{
        "openapi": "3.0.0",
        "info": {
            "title": "Test API",
            "version": "1.0.0"
        },
        "paths": {}
    }"#;

    fn temp_document(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write temp file");
        temp_file.flush().expect("Failed to flush temp file");
        temp_file
    }

    #[tokio::test]
    async fn test_file_openapi_loader_json() {
        let loader = FileOpenApiLoader::new();
        let temp_file = temp_document(".json", DOCUMENT_JSON);

        let document = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(document.version.as_deref(), Some("3.0.0"));
        assert_eq!(document.info.title, "Test API");
        assert_eq!(document.info.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_file_openapi_loader_yaml() {
        let loader = FileOpenApiLoader::new();
        let temp_file = temp_document(
            ".yaml",
            "openapi: 3.0.0\ninfo:\n  title: Test API\n  version: 1.0.0\npaths: {}\n",
        );

        let document = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(document.info.title, "Test API");
    }

    #[tokio::test]
    async fn test_file_openapi_loader_sniffs_format() {
        let loader = FileOpenApiLoader::new();
        let temp_file = temp_document(".txt", DOCUMENT_JSON);

        let document = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(document.info.title, "Test API");
    }

    #[tokio::test]
    async fn test_file_openapi_loader_not_found() {
        let loader = FileOpenApiLoader::new();

        let result = loader.load("/nonexistent/file.yaml").await;
        assert!(matches!(result, Err(GenerationError::IoError(_))));
    }

    #[tokio::test]
    async fn test_composite_loader_file() {
        let loader = CompositeOpenApiLoader::new().unwrap();
        let temp_file = temp_document(".json", DOCUMENT_JSON);

        let result = loader.load(temp_file.path().to_str().unwrap()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_composite_loader_http() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-spec.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(DOCUMENT_JSON.replace("Test API", "HTTP Test API"))
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let loader = CompositeOpenApiLoader::new().unwrap();
        let url = format!("{}/api-spec.json", mock_server.uri());

        let document = loader.load(&url).await.unwrap();
        assert_eq!(document.info.title, "HTTP Test API");
    }

    #[test]
    fn test_parse_document_text_preserves_key_order() {
        let value = parse_document_text(
            r#"{"paths": {"/b": {}, "/a": {}}}"#,
            "inline",
            None,
        )
        .unwrap();
        let keys: Vec<_> = value["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/b", "/a"]);
    }
}
