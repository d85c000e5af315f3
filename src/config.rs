//! Command-line and environment configuration

use clap::Parser;
use std::path::PathBuf;

use crate::generation::{GenerationError, GenerationOptions, OutputLanguage};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "openapi-ts-gen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL or file path of the OpenAPI document (JSON or YAML)
    #[arg(long, env = "API_URL")]
    pub source_url: Option<String>,

    /// Output language: `ts` for TypeScript sources, `js` for JavaScript plus declarations
    #[arg(long = "lang", env = "API_LANG")]
    pub lang: Option<String>,

    /// Directory the client is written to
    #[arg(long = "output", env = "API_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Directory with `api.ts.tera` and/or `client.ts` overriding the built-in templates
    #[arg(long, env = "API_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,
}

/// Validated generator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub source_url: String,
    pub output_language: OutputLanguage,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Validates raw arguments. Fails on missing required values before any
    /// file or network access happens.
    pub fn from_cli(cli: Cli) -> Result<Self, GenerationError> {
        let source_url = cli
            .source_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidConfiguration(
                    "sourceUrl is required (--source-url or API_URL)".to_string(),
                )
            })?;

        let output_dir = cli
            .output
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidConfiguration(
                    "outputDirectory is required (--output or API_OUTPUT)".to_string(),
                )
            })?;

        let output_language = match cli.lang.as_deref().map(str::trim) {
            None | Some("") => OutputLanguage::default(),
            Some(lang) => lang.parse()?,
        };

        Ok(Self {
            source_url,
            output_language,
            output_dir,
            template_dir: cli.template_dir,
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            language: self.output_language,
            output_dir: self.output_dir.clone(),
        }
    }
}
