//! Use case for generating TypeScript clients

use crate::application::{ApplicationError, GenerateClientRequest, GenerateClientResponse};
use crate::generation::{GenerationOrchestrator, OpenApiLoader};
use std::sync::Arc;
use tracing::info;

/// Use case for generating client implementations
pub struct GenerateClientUseCase {
    loader: Arc<dyn OpenApiLoader>,
    generation_orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateClientUseCase {
    pub fn new(
        loader: Arc<dyn OpenApiLoader>,
        generation_orchestrator: Arc<GenerationOrchestrator>,
    ) -> Self {
        Self {
            loader,
            generation_orchestrator,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateClientRequest,
    ) -> Result<GenerateClientResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        // 2. Load the document; nothing below runs until it is in memory
        let document = self.loader.load(&request.source).await?;
        info!(
            title = %document.info.title,
            version = %document.info.version,
            "Loaded API document"
        );

        // 3. Generate and emit
        let result = self
            .generation_orchestrator
            .generate(&document, &request.options(), &request.runtime_wrapper)
            .await?;

        Ok(GenerateClientResponse::new(result, request.output_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        ApiDocument, EmissionPipeline, GenerationError, OutputLanguage, RenderContext,
        RenderHelpers, SourceRenderer,
    };
    use crate::infrastructure::TypeScriptTranspiler;
    use crate::infrastructure::openapi::OpenApiParser;
    use crate::infrastructure::output::FileSystemOutputService;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_execute_success() {
        let temp = TempDir::new().unwrap();
        let use_case = GenerateClientUseCase::new(
            Arc::new(MockLoader),
            Arc::new(create_orchestrator()),
        );

        let request = GenerateClientRequest {
            source: "memory://petstore".to_string(),
            language: OutputLanguage::Ts,
            output_dir: temp.path().to_path_buf(),
            runtime_wrapper: "export default {}\n".to_string(),
        };

        let response = use_case.execute(request).await.unwrap();
        assert_eq!(response.operations, 1);
        assert_eq!(response.models, 0);
        assert_eq!(response.written.len(), 2);
        assert_eq!(response.output_path, temp.path());
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_request_before_loading() {
        let use_case = GenerateClientUseCase::new(
            Arc::new(FailingLoader),
            Arc::new(create_orchestrator()),
        );

        let request = GenerateClientRequest {
            source: String::new(),
            language: OutputLanguage::Ts,
            output_dir: PathBuf::from("/output"),
            runtime_wrapper: String::new(),
        };

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_execute_surfaces_load_errors() {
        let temp = TempDir::new().unwrap();
        let use_case = GenerateClientUseCase::new(
            Arc::new(FailingLoader),
            Arc::new(create_orchestrator()),
        );

        let request = GenerateClientRequest {
            source: "https://unreachable.test/openapi.json".to_string(),
            language: OutputLanguage::Ts,
            output_dir: temp.path().join("out"),
            runtime_wrapper: String::new(),
        };

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::GenerationError(GenerationError::LoadError(_))
        ));
        assert!(!temp.path().join("out").exists());
    }

    // Helper functions
    fn create_orchestrator() -> GenerationOrchestrator {
        GenerationOrchestrator::new(
            Arc::new(MockRenderer),
            EmissionPipeline::new(
                Arc::new(FileSystemOutputService::new()),
                Arc::new(TypeScriptTranspiler::new()),
            ),
        )
    }

    // Mock implementations
    struct MockLoader;

    #[async_trait::async_trait]
    impl OpenApiLoader for MockLoader {
        async fn load(&self, _source: &str) -> Result<ApiDocument, GenerationError> {
            OpenApiParser::new(serde_json::json!({
                "openapi": "3.0.0",
                "info": { "title": "Mock", "version": "0.1.0" },
                "paths": {
                    "/health": { "get": { "responses": { "200": { "description": "ok" } } } }
                }
            }))
            .parse()
        }
    }

    struct FailingLoader;

    #[async_trait::async_trait]
    impl OpenApiLoader for FailingLoader {
        async fn load(&self, source: &str) -> Result<ApiDocument, GenerationError> {
            Err(GenerationError::LoadError(format!("cannot reach {source}")))
        }
    }

    struct MockRenderer;

    impl SourceRenderer for MockRenderer {
        fn render(
            &self,
            context: &RenderContext,
            _helpers: &RenderHelpers,
        ) -> Result<String, GenerationError> {
            Ok(context
                .operations
                .iter()
                .map(|op| format!("export function {}(): void {{}}\n", op.name))
                .collect())
        }
    }
}
