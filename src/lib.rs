//! Generates typed TypeScript API clients from OpenAPI documents.
//!
//! The pipeline loads a document, indexes its named schemas, turns every
//! operation into a render-ready descriptor, renders `api.ts` from a Tera
//! template and writes it next to a thin runtime wrapper. In `js` mode both
//! files are lowered to JavaScript with `.d.ts` declarations beside them.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;

use std::sync::Arc;

use application::{
    ApplicationError, GenerateClientRequest, GenerateClientResponse, GenerateClientUseCase,
};
use config::GeneratorConfig;
use generation::{EmissionPipeline, GenerationOrchestrator};
use infrastructure::generation::TeraTemplateRenderer;
use infrastructure::openapi::CompositeOpenApiLoader;
use infrastructure::output::FileSystemOutputService;
use infrastructure::{TemplateSet, TypeScriptTranspiler};

/// Runs one generation with the default loaders, renderer and output service.
pub async fn run(config: &GeneratorConfig) -> Result<GenerateClientResponse, ApplicationError> {
    let templates = TemplateSet::load(config.template_dir.as_deref()).await?;

    let orchestrator = GenerationOrchestrator::new(
        Arc::new(TeraTemplateRenderer::new(templates.api)),
        EmissionPipeline::new(
            Arc::new(FileSystemOutputService::new()),
            Arc::new(TypeScriptTranspiler::new()),
        ),
    );
    let use_case =
        GenerateClientUseCase::new(Arc::new(CompositeOpenApiLoader::new()?), Arc::new(orchestrator));

    use_case
        .execute(GenerateClientRequest::from_config(config, templates.client))
        .await
}
