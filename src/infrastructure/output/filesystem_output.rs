//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        fs::create_dir_all(path).await.map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn exists(&self, path: &Path) -> Result<bool, GenerationError> {
        match fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GenerationError::OutputError(format!(
                "Failed to inspect {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn write_artifact(&self, artifact: &Artifact) -> Result<(), GenerationError> {
        if let Some(parent) = artifact.path.parent() {
            self.ensure_directory(parent).await?;
        }

        let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to create file {}: {}",
                artifact.path.display(),
                e
            ))
        })?;

        file.write_all(artifact.content.as_bytes())
            .await
            .map_err(|e| {
                GenerationError::OutputError(format!(
                    "Failed to write file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

        file.flush().await.map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to flush file {}: {}",
                artifact.path.display(),
                e
            ))
        })?;

        debug!("Wrote {} ({} bytes)", artifact.path.display(), artifact.content.len());
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), GenerationError> {
        fs::remove_file(path).await.map_err(|e| {
            GenerationError::OutputError(format!("Failed to remove {}: {}", path.display(), e))
        })
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
