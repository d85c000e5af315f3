//! openapi-ts-gen CLI entrypoint
//! Reads configuration from flags, the environment and `.env`, then runs one generation.
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use openapi_ts_gen::config::{Cli, GeneratorConfig};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables from .env act as defaults for the API_* settings
    dotenvy::dotenv().ok();

    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig::from_cli(cli).context("Invalid configuration")?;

    info!(
        source = %config.source_url,
        lang = %config.output_language,
        output = %config.output_dir.display(),
        "Generating API client"
    );

    let response = openapi_ts_gen::run(&config)
        .await
        .with_context(|| format!("Failed to generate client from {}", config.source_url))?;

    info!(
        models = response.models,
        operations = response.operations,
        written = response.written.len(),
        skipped = response.skipped.len(),
        "✅ Client generated in {}",
        response.output_path.display()
    );

    Ok(())
}
