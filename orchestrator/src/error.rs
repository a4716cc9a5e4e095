//! Orchestrator-specific error types

use shared::SharedError;
use thiserror::Error;

/// Exit code used for failures that carry no status of their own
pub const GENERIC_FAILURE_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Dataset download failed: {url}: {message}")]
    DownloadFailed { url: String, message: String },

    #[error("Command `{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Failed to spawn `{program}`: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("Processing tool not found: {message}")]
    ToolNotFound { message: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Failed to patch {path}: {message}")]
    PatchFailed { path: String, message: String },

    #[error("File system operation failed: {operation} on {path}: {source}")]
    FileSystemError {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Network communication error: {message}")]
    NetworkError { message: String },
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn tool_not_found(message: impl Into<String>) -> Self {
        Self::ToolNotFound {
            message: message.into(),
        }
    }

    pub fn file_system(operation: impl Into<String>, path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.to_string(),
            source,
        }
    }

    /// Process exit code this error should surface as.
    ///
    /// A failed external command passes its own status through; everything
    /// else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestratorError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => GENERIC_FAILURE_CODE,
        }
    }
}

impl From<reqwest::Error> for OrchestratorError {
    fn from(err: reqwest::Error) -> Self {
        OrchestratorError::NetworkError {
            message: err.to_string(),
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
