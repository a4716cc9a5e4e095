//! Run orchestrator library for the medium-chunk demo
//!
//! This library drives a demo run of an external imaging-spectroscopy
//! processing tool: it fetches the test dataset once, patches the run
//! configuration and hands control to the tool's entry point. Every side
//! effect sits behind a trait so the pipeline can be tested with mocks.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::{CliArgs, RunSettings, ToolSource};
pub use crate::core::{DatasetLayout, ExitOutcome, Invocation, RunReport};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::{Orchestrator, ToolPaths};
pub use traits::{
    ConfigStore, DatasetSource, MockConfigStore, MockDatasetSource, MockProcessRunner, MockToolLocator,
    ProcessRunner, ToolLocator,
};
