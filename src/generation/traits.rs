//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::Path;

use crate::generation::{
    ApiDocument, Artifact, GenerationError, RenderContext, RenderHelpers,
};

/// Loads API documents
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load an API document from a source (URL or path)
    async fn load(&self, source: &str) -> Result<ApiDocument, GenerationError>;
}

/// Renders models and operations into TypeScript source text
pub trait SourceRenderer: Send + Sync {
    /// Render the API module. `helpers` is bound to the registry the
    /// context was built from.
    fn render(
        &self,
        context: &RenderContext,
        helpers: &RenderHelpers,
    ) -> Result<String, GenerationError>;
}

/// Turns TypeScript source text into its runtime and declaration forms
pub trait Transpiler: Send + Sync {
    /// Strip type syntax, producing plain JavaScript
    fn lower(&self, file_name: &str, source: &str) -> Result<String, GenerationError>;

    /// Produce `.d.ts` text describing the exported shapes of `source`
    fn extract_declarations(
        &self,
        file_name: &str,
        source: &str,
    ) -> Result<String, GenerationError>;
}

/// Destination for generated files
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;

    /// Whether a file already occupies `path`
    async fn exists(&self, path: &Path) -> Result<bool, GenerationError>;

    /// Write one artifact, replacing any previous content
    async fn write_artifact(&self, artifact: &Artifact) -> Result<(), GenerationError>;

    /// Delete a file written earlier in the run
    async fn remove_file(&self, path: &Path) -> Result<(), GenerationError>;
}
