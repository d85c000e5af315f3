//! Generation orchestration - coordinates the generation workflow

use crate::generation::{
    ApiDocument, EmissionPipeline, GenerationError, GenerationOptions, GenerationResult,
    OperationTransformer, RenderContext, RenderHelpers, SchemaRegistry, SourceRenderer,
};
use std::sync::Arc;

/// Orchestrates the code generation workflow
pub struct GenerationOrchestrator {
    renderer: Arc<dyn SourceRenderer>,
    emitter: EmissionPipeline,
}

impl GenerationOrchestrator {
    /// Create a new generation orchestrator
    pub fn new(renderer: Arc<dyn SourceRenderer>, emitter: EmissionPipeline) -> Self {
        Self { renderer, emitter }
    }

    /// Execute the generation workflow for an already loaded document
    pub async fn generate(
        &self,
        document: &ApiDocument,
        options: &GenerationOptions,
        runtime_wrapper: &str,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Build the registry once; everything below reads it
        let registry = Arc::new(SchemaRegistry::new(&document.schemas));

        // 2. Transform operations against the registry
        let operations = OperationTransformer::new(&registry).transform_all(document)?;

        tracing::debug!(
            "Orchestrator starting generation with {} models and {} operations",
            registry.len(),
            operations.len()
        );

        // 3. Build render context
        let models: Vec<_> = registry.models().cloned().collect();
        let (model_count, operation_count) = (models.len(), operations.len());
        let context = RenderContext::new(models, operations).with_api_info(&document.info);

        // 4. Render the API module with helpers bound to the same registry
        let helpers = RenderHelpers::new(Arc::clone(&registry));
        let source = self.renderer.render(&context, &helpers)?;

        // 5. Emit artifacts
        let emission = self.emitter.emit(&source, runtime_wrapper, options).await?;

        Ok(GenerationResult {
            models: model_count,
            operations: operation_count,
            emission,
        })
    }
}
