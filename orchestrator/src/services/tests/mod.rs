//! Service-specific tests
//!
//! Each service has its own test file exercising the real implementation
//! against a scratch directory, a local HTTP server or real child processes.


// Common test utilities for services
pub mod common {
    use std::path::Path;

    /// Write a file, creating parent directories as needed
    pub fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(path, contents).expect("write test file");
    }

    /// Names of all entries in `dir`, sorted
    pub fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
