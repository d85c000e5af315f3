//! Emission of the rendered source into the output directory
//!
//! In `ts` mode the rendered module is written as is. In `js` mode the
//! module is lowered to JavaScript and a declaration file is extracted from
//! the original TypeScript text; the intermediate `.ts` files this run
//! wrote are removed afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::generation::{
    Artifact, EmissionReport, GenerationError, GenerationOptions, OutputLanguage, OutputService,
    Transpiler,
};

/// Base name of the rendered operations/models module
pub const API_MODULE: &str = "api";
/// Base name of the runtime wrapper
pub const CLIENT_MODULE: &str = "client";

/// Writes generated sources according to the output language
pub struct EmissionPipeline {
    output: Arc<dyn OutputService>,
    transpiler: Arc<dyn Transpiler>,
}

impl EmissionPipeline {
    pub fn new(output: Arc<dyn OutputService>, transpiler: Arc<dyn Transpiler>) -> Self {
        Self { output, transpiler }
    }

    /// Emit `api_source` and, when no wrapper exists yet, `runtime_wrapper`.
    pub async fn emit(
        &self,
        api_source: &str,
        runtime_wrapper: &str,
        options: &GenerationOptions,
    ) -> Result<EmissionReport, GenerationError> {
        let dir = options.output_dir.as_path();
        let mut report = EmissionReport::default();

        self.output.ensure_directory(dir).await?;

        let api_ts = module_path(dir, API_MODULE, "ts");
        self.write(&api_ts, api_source, &mut report).await?;

        let wrapper_path = module_path(dir, CLIENT_MODULE, options.language.file_extension());
        let fresh_wrapper = if self.output.exists(&wrapper_path).await? {
            info!(
                path = %wrapper_path.display(),
                "Runtime wrapper already exists, leaving it untouched"
            );
            report.skipped.push(wrapper_path);
            false
        } else {
            true
        };

        match options.language {
            OutputLanguage::Ts => {
                if fresh_wrapper {
                    let client_ts = module_path(dir, CLIENT_MODULE, "ts");
                    self.write(&client_ts, runtime_wrapper, &mut report).await?;
                }
            }
            OutputLanguage::Js => {
                let mut intermediates = vec![api_ts];

                if fresh_wrapper {
                    // A hand-kept client.ts next to the js output is never replaced
                    let client_ts = module_path(dir, CLIENT_MODULE, "ts");
                    if !self.output.exists(&client_ts).await? {
                        self.write(&client_ts, runtime_wrapper, &mut report).await?;
                        intermediates.push(client_ts);
                    }
                    self.compile(dir, CLIENT_MODULE, runtime_wrapper, &mut report)
                        .await?;
                }

                self.compile(dir, API_MODULE, api_source, &mut report).await?;

                for path in intermediates {
                    self.output.remove_file(&path).await?;
                    info!(path = %path.display(), "Removed intermediate source");
                    report.removed.push(path);
                }
            }
        }

        Ok(report)
    }

    /// Lower `source` to `<module>.js` and extract `<module>.d.ts`. Both
    /// passes read the original TypeScript text.
    async fn compile(
        &self,
        dir: &Path,
        module: &str,
        source: &str,
        report: &mut EmissionReport,
    ) -> Result<(), GenerationError> {
        let file_name = format!("{module}.ts");
        let javascript = self.transpiler.lower(&file_name, source)?;
        let declarations = self.transpiler.extract_declarations(&file_name, source)?;
        debug!(
            module = %module,
            js_bytes = javascript.len(),
            dts_bytes = declarations.len(),
            "Transpiled module"
        );

        self.write(&module_path(dir, module, "js"), &javascript, report)
            .await?;
        self.write(&module_path(dir, module, "d.ts"), &declarations, report)
            .await
    }

    async fn write(
        &self,
        path: &Path,
        content: &str,
        report: &mut EmissionReport,
    ) -> Result<(), GenerationError> {
        self.output
            .write_artifact(&Artifact::new(path, content))
            .await?;
        info!(path = %path.display(), "Wrote artifact");
        report.written.push(path.to_path_buf());
        Ok(())
    }
}

fn module_path(dir: &Path, module: &str, extension: &str) -> PathBuf {
    dir.join(format!("{module}.{extension}"))
}
