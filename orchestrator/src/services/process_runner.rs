//! Real process runner implementation
//!
//! Spawns external commands with tokio and waits for them. Stdio is either
//! inherited, so the processing tool talks straight to the user's terminal,
//! or captured for commands whose output we parse.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::core::{CapturedOutput, ExitOutcome, Invocation};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::ProcessRunner;
use shared::{step_debug, RunStep};

/// Real process runner backed by `tokio::process`
#[derive(Debug, Default, Clone)]
pub struct RealProcessRunner;

impl RealProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(ref dir) = invocation.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(invocation: &Invocation, err: std::io::Error) -> OrchestratorError {
        OrchestratorError::SpawnFailed {
            program: invocation.program.to_string_lossy().into_owned(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ProcessRunner for RealProcessRunner {
    async fn run(&self, invocation: &Invocation) -> OrchestratorResult<ExitOutcome> {
        step_debug!(RunStep::Invoke, "▶️  {}", invocation);

        let status = Self::command(invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(ExitOutcome::from(status))
    }

    async fn capture(&self, invocation: &Invocation) -> OrchestratorResult<CapturedOutput> {
        step_debug!(RunStep::Locate, "▶️  {}", invocation);

        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(CapturedOutput {
            outcome: ExitOutcome::from(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
