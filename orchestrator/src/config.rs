//! Run settings
//!
//! Settings are layered: compiled defaults, then environment (including a
//! `.env` file loaded by `main`), then command-line flags. Running with no
//! flags at all reproduces the stock demo.
//!
//! ## Environment
//! - `EMULATOR_PATH` (required): written verbatim as the emulator base path.
//!   Unset or empty is a configuration error, raised before any step runs.
//! - `ISOFIT_BASE` (optional): install directory of the processing tool.
//!   When absent the interpreter is asked where the package lives.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::core::dataset::{
    archive_name_from_url, DatasetLayout, DEFAULT_ARCHIVE_URL, DEFAULT_DATA_DIR, DEFAULT_FILE_BASE,
};
use crate::error::{OrchestratorError, OrchestratorResult};

pub const EMULATOR_PATH_ENV: &str = "EMULATOR_PATH";
pub const TOOL_BASE_ENV: &str = "ISOFIT_BASE";

pub const DEFAULT_CONFIG_PATH: &str = "configs/medium_chunk.json";
pub const DEFAULT_OUTPUT_DIR: &str = "medium_chunk_test";
pub const DEFAULT_TOOL_PACKAGE: &str = "isofit";
pub const DEFAULT_ENTRY_SCRIPT: &str = "utils/apply_oe.py";
pub const DEFAULT_PYTHON: &str = "python";

/// Demo run orchestrator for the medium-chunk dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "run-orchestrator")]
#[command(about = "Fetches the medium-chunk dataset, patches the run configuration and starts processing")]
pub struct CliArgs {
    /// Directory every relative path is resolved against (default: current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Dataset archive URL
    #[arg(long)]
    pub archive_url: Option<String>,

    /// Local archive file name (default: last segment of the archive URL)
    #[arg(long)]
    pub archive_name: Option<String>,

    /// Directory the archive extracts into
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Naming prefix of the data products
    #[arg(long)]
    pub file_base: Option<String>,

    /// Configuration file to patch
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory handed to the processing tool
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Install directory of the processing tool (overrides ISOFIT_BASE)
    #[arg(long)]
    pub tool_base: Option<PathBuf>,

    /// Python package to look up when no tool base is configured
    #[arg(long)]
    pub tool_package: Option<String>,

    /// Entry script, relative to the tool base
    #[arg(long)]
    pub entry_script: Option<PathBuf>,

    /// Python interpreter
    #[arg(long)]
    pub python: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Where the processing tool's install directory comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolSource {
    /// Given directly by flag or environment
    Explicit(PathBuf),
    /// Looked up by asking the interpreter to import the package
    Interpreter { package: String },
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSettings {
    pub work_dir: PathBuf,
    pub archive_url: String,
    pub archive_name: String,
    pub layout: DatasetLayout,
    pub config_path: PathBuf,
    pub output_dir: PathBuf,
    pub tool: ToolSource,
    pub entry_script: PathBuf,
    pub python: String,
    pub emulator_base: String,
    pub log_level: String,
}

impl RunSettings {
    /// Resolve settings from the process environment
    pub fn from_env(args: CliArgs) -> OrchestratorResult<Self> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Resolve settings with an injectable environment lookup
    pub fn resolve<E>(args: CliArgs, env: E) -> OrchestratorResult<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let emulator_base = env(EMULATOR_PATH_ENV)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| OrchestratorError::config(format!("{EMULATOR_PATH_ENV} must be set to a non-empty path")))?;

        let archive_url = args.archive_url.unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string());
        let archive_name = match args.archive_name {
            Some(name) if !name.is_empty() => name,
            _ => archive_name_from_url(&archive_url)?,
        };

        let tool = match args
            .tool_base
            .or_else(|| env(TOOL_BASE_ENV).filter(|value| !value.is_empty()).map(PathBuf::from))
        {
            Some(base) => ToolSource::Explicit(base),
            None => {
                let package = args.tool_package.unwrap_or_else(|| DEFAULT_TOOL_PACKAGE.to_string());
                if !is_module_path(&package) {
                    return Err(OrchestratorError::config(format!(
                        "tool package '{package}' is not a dotted Python module name"
                    )));
                }
                ToolSource::Interpreter { package }
            }
        };

        let layout = DatasetLayout::new(
            args.data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            args.file_base.unwrap_or_else(|| DEFAULT_FILE_BASE.to_string()),
        );

        Ok(Self {
            work_dir: args.work_dir.unwrap_or_else(|| PathBuf::from(".")),
            archive_url,
            archive_name,
            layout,
            config_path: args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            output_dir: args.output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            tool,
            entry_script: args.entry_script.unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_SCRIPT)),
            python: args.python.unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
            emulator_base,
            log_level: args.log_level,
        })
    }

    /// Archive location on disk
    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(&self.archive_name)
    }

    /// Configuration file location on disk
    pub fn config_file(&self) -> PathBuf {
        self.work_dir.join(&self.config_path)
    }
}

/// `pkg` or `pkg.sub`, each segment a Python identifier
fn is_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(first) if first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
