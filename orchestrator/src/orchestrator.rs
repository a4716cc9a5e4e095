//! Main orchestrator implementation
//!
//! Runs the demo pipeline strictly in order: fetch the dataset, locate the
//! processing tool, patch the configuration, invoke the tool. Any error
//! aborts the remaining steps. The tool's own exit status is not an error;
//! it is reported back for the caller to pass through.

use chrono::Utc;
use std::path::PathBuf;

use shared::{logging, step_debug, step_info, step_warn, RunId, RunStep};

use crate::{
    config::RunSettings,
    core::{demo_overrides, ExitOutcome, Invocation, RunReport},
    error::{OrchestratorError, OrchestratorResult},
    traits::{ConfigStore, DatasetSource, ProcessRunner, ToolLocator},
};

/// Resolved location of the processing entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub base: PathBuf,
    pub entry_script: PathBuf,
}

/// Main orchestrator that drives one demo run
pub struct Orchestrator<D, L, C, P>
where
    D: DatasetSource,
    L: ToolLocator,
    C: ConfigStore,
    P: ProcessRunner,
{
    settings: RunSettings,

    /// Injected services
    dataset: D,
    locator: L,
    config_store: C,
    runner: P,
}

impl<D, L, C, P> Orchestrator<D, L, C, P>
where
    D: DatasetSource,
    L: ToolLocator,
    C: ConfigStore,
    P: ProcessRunner,
{
    /// Create new orchestrator with injected dependencies
    pub fn new(settings: RunSettings, dataset: D, locator: L, config_store: C, runner: P) -> Self {
        Self {
            settings,
            dataset,
            locator,
            config_store,
            runner,
        }
    }

    /// Execute all four steps and report the processing tool's exit status
    pub async fn run(&self) -> OrchestratorResult<RunReport> {
        let started_at = Utc::now();

        let downloaded = self
            .acquire_dataset()
            .await
            .inspect_err(|e| logging::log_error(RunStep::Fetch, "Dataset acquisition", e))?;
        let tool = self
            .resolve_tool()
            .await
            .inspect_err(|e| logging::log_error(RunStep::Locate, "Tool discovery", e))?;
        self.patch_config()
            .await
            .inspect_err(|e| logging::log_error(RunStep::Patch, "Configuration patch", e))?;
        let outcome = self
            .invoke(&tool)
            .await
            .inspect_err(|e| logging::log_error(RunStep::Invoke, "Processing invocation", e))?;

        Ok(RunReport {
            run_id: RunId::current().as_uuid(),
            started_at,
            finished_at: Utc::now(),
            downloaded,
            tool_base: tool.base,
            entry_script: tool.entry_script,
            outcome,
        })
    }

    /// Step 1: download and extract the dataset unless the archive is already present.
    ///
    /// Presence of the archive file is the whole cache check; its contents
    /// and the extracted tree are not inspected. Returns whether a download
    /// happened.
    pub async fn acquire_dataset(&self) -> OrchestratorResult<bool> {
        let archive = self.settings.archive_path();

        if tokio::fs::try_exists(&archive).await? {
            step_info!(
                RunStep::Fetch,
                "📦 {} already present, skipping download",
                self.settings.archive_name
            );
            return Ok(false);
        }

        logging::log_progress(RunStep::Fetch, "Downloading", &self.settings.archive_url);
        let bytes = self
            .dataset
            .download(&self.settings.archive_url, &archive)
            .await?;
        step_debug!(RunStep::Fetch, "Downloaded {} bytes", bytes);

        let extract = Invocation::extract_archive(&archive, &self.settings.work_dir);
        logging::log_progress(RunStep::Fetch, "Extracting", &self.settings.archive_name);
        let outcome = self.runner.run(&extract).await?;
        if !outcome.success() {
            return Err(OrchestratorError::CommandFailed {
                command: extract.to_string(),
                code: outcome.exit_code(),
            });
        }

        logging::log_success(RunStep::Fetch, "Dataset downloaded and extracted");
        Ok(true)
    }

    /// Step 2: find the processing tool and its entry script.
    ///
    /// Fails with `ToolNotFound` when the install directory or the entry
    /// script does not exist.
    pub async fn resolve_tool(&self) -> OrchestratorResult<ToolPaths> {
        let located = self.locator.locate().await?;

        // Absolute, so the entry script still resolves from the child's cwd
        let base = match tokio::fs::canonicalize(&located).await {
            Ok(base) if base.is_dir() => base,
            _ => {
                return Err(OrchestratorError::tool_not_found(format!(
                    "install directory {} does not exist",
                    located.display()
                )))
            }
        };

        let entry_script = base.join(&self.settings.entry_script);
        if !tokio::fs::metadata(&entry_script)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
        {
            return Err(OrchestratorError::tool_not_found(format!(
                "entry script {} does not exist",
                entry_script.display()
            )));
        }

        step_info!(RunStep::Locate, "🔍 Processing tool at {}", base.display());
        Ok(ToolPaths { base, entry_script })
    }

    /// Step 3: apply the demo overrides to the configuration file.
    ///
    /// Each override is its own read-modify-replace pass, in order, so the
    /// file on disk is valid JSON after every pass.
    pub async fn patch_config(&self) -> OrchestratorResult<()> {
        let path = self.settings.config_file();
        let overrides = demo_overrides(&self.settings.emulator_base)?;

        for field in &overrides {
            let mut document = self.config_store.load(&path).await?;
            field.apply(&mut document).map_err(|e| OrchestratorError::PatchFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            self.config_store.replace(&path, &document).await?;

            logging::log_progress(RunStep::Patch, "Set", &field.to_string());
        }

        logging::log_success(
            RunStep::Patch,
            &format!("Applied {} overrides to {}", overrides.len(), path.display()),
        );
        Ok(())
    }

    /// Step 4: run the processing entry point and hand back its exit status
    pub async fn invoke(&self, tool: &ToolPaths) -> OrchestratorResult<ExitOutcome> {
        let invocation = Invocation::processing(
            &self.settings.python,
            &tool.entry_script,
            &self.settings.layout,
            &self.settings.output_dir,
            &self.settings.config_path,
        )
        .current_dir(&self.settings.work_dir);

        logging::log_progress(RunStep::Invoke, "Running", &invocation.to_string());
        let outcome = self.runner.run(&invocation).await?;

        if outcome.success() {
            logging::log_success(RunStep::Invoke, "Processing finished");
        } else {
            step_warn!(
                RunStep::Invoke,
                "⚠️  Processing exited with status {}",
                outcome.exit_code()
            );
        }
        Ok(outcome)
    }
}
