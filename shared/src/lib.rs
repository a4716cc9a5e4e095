//! Shared types for the demo run orchestrator
//!
//! Holds the data model the pipeline mutates (field paths and overrides),
//! the step identifiers used to tag log output, and logging setup.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
