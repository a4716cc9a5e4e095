//! External command descriptions
//!
//! An `Invocation` is a plain value describing what to run; the process
//! runner service decides how. Keeping it a value lets tests assert on the
//! exact argument vector without spawning anything.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::dataset::DatasetLayout;

/// A command line plus the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// `tar -xzf <archive> -C <destination>`
    pub fn extract_archive(archive: &Path, destination: &Path) -> Self {
        Self::new("tar")
            .arg("-xzf")
            .arg(archive)
            .arg("-C")
            .arg(destination)
    }

    /// Ask the interpreter where `package` is installed
    pub fn locate_package(python: &str, package: &str) -> Self {
        let script = format!("import os, {package}; print(os.path.dirname({package}.__file__))");
        Self::new(python).arg("-c").arg(script)
    }

    /// The processing run: entry script followed by its five positional paths
    pub fn processing(
        python: &str,
        entry_script: &Path,
        layout: &DatasetLayout,
        output_dir: &Path,
        config_path: &Path,
    ) -> Self {
        Self::new(python)
            .arg(entry_script)
            .arg(layout.radiance())
            .arg(layout.location())
            .arg(layout.observation())
            .arg(output_dir)
            .arg(config_path)
    }

    /// Arguments as lossy UTF-8, for logging and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
