//! Processing tool discovery
//!
//! An explicitly configured install directory always wins. Without one the
//! interpreter is asked to import the package and print its directory,
//! which ties discovery to a working Python environment, so it is only the
//! fallback.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::config::ToolSource;
use crate::core::Invocation;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::services::RealProcessRunner;
use crate::traits::{ProcessRunner, ToolLocator};
use shared::{step_debug, RunStep};

/// Real tool locator, generic over the runner used for interpreter queries
pub enum RealToolLocator<R = RealProcessRunner> {
    Configured(PathBuf),
    Interpreter {
        runner: R,
        python: String,
        package: String,
    },
}

impl RealToolLocator<RealProcessRunner> {
    /// Build the locator matching a resolved tool source
    pub fn from_source(source: &ToolSource, python: &str) -> Self {
        match source {
            ToolSource::Explicit(base) => Self::Configured(base.clone()),
            ToolSource::Interpreter { package } => {
                Self::interpreter(RealProcessRunner::new(), python, package)
            }
        }
    }
}

impl<R: ProcessRunner> RealToolLocator<R> {
    pub fn configured(base: impl Into<PathBuf>) -> Self {
        Self::Configured(base.into())
    }

    pub fn interpreter(runner: R, python: impl Into<String>, package: impl Into<String>) -> Self {
        Self::Interpreter {
            runner,
            python: python.into(),
            package: package.into(),
        }
    }

    async fn ask_interpreter(&self, runner: &R, python: &str, package: &str) -> OrchestratorResult<PathBuf> {
        let invocation = Invocation::locate_package(python, package);
        let output = runner.capture(&invocation).await.map_err(|e| {
            OrchestratorError::tool_not_found(format!("could not run {python} to locate '{package}': {e}"))
        })?;

        if !output.outcome.success() {
            return Err(OrchestratorError::tool_not_found(format!(
                "'{package}' is not importable by {python} (exit {}): {}",
                output.outcome.exit_code(),
                output.stderr.trim()
            )));
        }

        // Imports may print banners; the directory is the last line
        let base = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .ok_or_else(|| {
                OrchestratorError::tool_not_found(format!("{python} printed no install directory for '{package}'"))
            })?;

        step_debug!(RunStep::Locate, "🔍 {} reports '{}' at {}", python, package, base);
        Ok(PathBuf::from(base))
    }
}

#[async_trait]
impl<R: ProcessRunner> ToolLocator for RealToolLocator<R> {
    async fn locate(&self) -> OrchestratorResult<PathBuf> {
        match self {
            RealToolLocator::Configured(base) => Ok(base.clone()),
            RealToolLocator::Interpreter {
                runner,
                python,
                package,
            } => self.ask_interpreter(runner, python, package).await,
        }
    }
}
