//! Service implementations
//!
//! This module contains real implementations of all service traits.
//! These are the production implementations that handle actual I/O operations.

pub mod config_store;
pub mod dataset_source;
pub mod process_runner;
pub mod tool_locator;

#[cfg(test)]
mod tests;

use std::path::Path;

// Re-export all service implementations
pub use config_store::RealConfigStore;
pub use dataset_source::RealDatasetSource;
pub use process_runner::RealProcessRunner;
pub use tool_locator::RealToolLocator;

/// Directory holding `path`, treating a bare file name as the current directory
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
