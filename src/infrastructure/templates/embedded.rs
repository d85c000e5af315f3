//! Templates compiled into the binary
//!
//! The `templates/typescript/` directory is embedded at build time so the
//! generator works without any template files next to it.

use rust_embed::RustEmbed;

use crate::generation::GenerationError;

#[derive(RustEmbed)]
#[folder = "templates/typescript/"]
pub struct EmbeddedTemplates;

/// Reads one embedded template as text
pub(super) fn read(name: &str) -> Result<String, GenerationError> {
    let file = EmbeddedTemplates::get(name).ok_or_else(|| {
        GenerationError::RenderError(format!("Embedded template '{name}' not found"))
    })?;
    String::from_utf8(file.data.into_owned()).map_err(|e| {
        GenerationError::RenderError(format!("Embedded template '{name}' is not valid UTF-8: {e}"))
    })
}
