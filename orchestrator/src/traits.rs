//! Trait definitions with mockall annotations for testing
//!
//! Every side effect of a run goes through one of these traits: the network
//! fetch, child processes, the configuration file and tool discovery. The
//! orchestrator is generic over them so tests can swap in mocks.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::core::{CapturedOutput, ExitOutcome, Invocation};
use crate::error::OrchestratorResult;

/// Remote dataset retrieval
#[mockall::automock]
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Download `url` to `destination`
    ///
    /// # Returns
    /// Number of bytes written. On failure nothing is left at `destination`.
    async fn download(&self, url: &str, destination: &Path) -> OrchestratorResult<u64>;
}

/// Child process execution
#[mockall::automock]
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion with inherited stdio
    ///
    /// A non-zero exit is reported in the outcome, not as an error; only a
    /// failure to start the process is an error.
    async fn run(&self, invocation: &Invocation) -> OrchestratorResult<ExitOutcome>;

    /// Run to completion capturing stdout and stderr
    async fn capture(&self, invocation: &Invocation) -> OrchestratorResult<CapturedOutput>;
}

/// JSON configuration persistence
#[mockall::automock]
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read and parse the document at `path`
    async fn load(&self, path: &Path) -> OrchestratorResult<Value>;

    /// Atomically replace the document at `path`
    async fn replace(&self, path: &Path, document: &Value) -> OrchestratorResult<()>;
}

/// Processing tool discovery
#[mockall::automock]
#[async_trait::async_trait]
pub trait ToolLocator: Send + Sync {
    /// Install directory of the processing tool
    async fn locate(&self) -> OrchestratorResult<PathBuf>;
}
