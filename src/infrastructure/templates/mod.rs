//! Template sources for the generated client

mod embedded;

pub use embedded::EmbeddedTemplates;

use std::io;
use std::path::Path;
use tracing::info;

use crate::generation::GenerationError;

/// Tera template for the API module
pub const API_TEMPLATE_FILE: &str = "api.ts.tera";
/// Runtime wrapper source, copied verbatim
pub const CLIENT_TEMPLATE_FILE: &str = "client.ts";

/// The API module template and the runtime wrapper source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub api: String,
    pub client: String,
}

impl TemplateSet {
    /// Templates shipped inside the binary
    pub fn embedded() -> Result<Self, GenerationError> {
        Ok(Self {
            api: embedded::read(API_TEMPLATE_FILE)?,
            client: embedded::read(CLIENT_TEMPLATE_FILE)?,
        })
    }

    /// Templates from `dir`. A file missing from the directory falls back
    /// to the embedded copy.
    pub async fn from_dir(dir: &Path) -> Result<Self, GenerationError> {
        let is_dir = tokio::fs::metadata(dir)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(GenerationError::InvalidConfiguration(format!(
                "Template directory {} does not exist",
                dir.display()
            )));
        }

        Ok(Self {
            api: read_or_embedded(dir, API_TEMPLATE_FILE).await?,
            client: read_or_embedded(dir, CLIENT_TEMPLATE_FILE).await?,
        })
    }

    /// Templates from `dir` when given, otherwise the embedded set
    pub async fn load(dir: Option<&Path>) -> Result<Self, GenerationError> {
        match dir {
            Some(dir) => Self::from_dir(dir).await,
            None => Self::embedded(),
        }
    }
}

async fn read_or_embedded(dir: &Path, name: &str) -> Result<String, GenerationError> {
    let path = dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => {
            info!("Using template override {}", path.display());
            Ok(content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => embedded::read(name),
        Err(e) => Err(GenerationError::IoError(e)),
    }
}
