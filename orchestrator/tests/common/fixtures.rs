//! Test fixtures and sample data
//!
//! This module provides the stock demo inputs used across test suites:
//! settings, configuration documents and on-disk work directories.

use clap::Parser;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use run_orchestrator::{CliArgs, RunSettings};

/// Collection of test fixtures for the demo run
pub struct TestFixtures;

impl TestFixtures {
    pub const EMULATOR_PATH: &'static str = "/opt/emulators/default";
    pub const ARCHIVE_NAME: &'static str = "medium_chunk.tar.gz";
    pub const CONFIG_PATH: &'static str = "configs/medium_chunk.json";
    pub const ENTRY_SCRIPT: &'static str = "utils/apply_oe.py";

    /// Configuration as the setup step leaves it
    pub fn initial_config() -> Value {
        json!({
            "general_options": {"empirical_line": false, "debug_mode": true},
            "other": {"x": 1}
        })
    }

    /// Configuration after all three overrides
    pub fn patched_config() -> Value {
        json!({
            "general_options": {"empirical_line": true, "debug_mode": false},
            "processors": {
                "general_inversion_parameters": {
                    "filepaths": {"emulator_base": Self::EMULATOR_PATH}
                }
            },
            "other": {"x": 1}
        })
    }

    /// Processing arguments after the entry script
    pub fn processing_args() -> Vec<String> {
        vec![
            "medium_chunk/ang20170323t202244_rdn_7k-8k".to_string(),
            "medium_chunk/ang20170323t202244_loc_7k-8k".to_string(),
            "medium_chunk/ang20170323t202244_obs_7k-8k".to_string(),
            "medium_chunk_test".to_string(),
            Self::CONFIG_PATH.to_string(),
        ]
    }

    /// Settings rooted at `work_dir` with an explicit tool base
    pub fn settings(work_dir: &Path, tool_base: &Path) -> RunSettings {
        Self::settings_with(work_dir, tool_base, &[])
    }

    /// Settings rooted at `work_dir` with extra command-line flags
    pub fn settings_with(work_dir: &Path, tool_base: &Path, extra: &[&str]) -> RunSettings {
        let mut argv: Vec<String> = vec![
            "run-orchestrator".to_string(),
            "--work-dir".to_string(),
            work_dir.display().to_string(),
            "--tool-base".to_string(),
            tool_base.display().to_string(),
        ];
        argv.extend(extra.iter().map(|arg| arg.to_string()));

        let args = CliArgs::try_parse_from(argv).expect("valid test arguments");
        RunSettings::resolve(args, |name| match name {
            "EMULATOR_PATH" => Some(Self::EMULATOR_PATH.to_string()),
            _ => None,
        })
        .expect("valid test settings")
    }
}

/// A scratch work directory plus a fake tool install
pub struct Workspace {
    pub root: TempDir,
    pub work_dir: PathBuf,
    pub tool_base: PathBuf,
}

impl Workspace {
    /// Work directory holding the initial config and a tool base with an entry script
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let work_dir = root.path().join("work");
        let tool_base = root.path().join("isofit");

        std::fs::create_dir_all(work_dir.join("configs")).expect("create configs dir");
        std::fs::create_dir_all(tool_base.join("utils")).expect("create tool dir");
        std::fs::write(tool_base.join(TestFixtures::ENTRY_SCRIPT), "# entry point\n").expect("write entry script");

        let workspace = Self {
            root,
            work_dir,
            tool_base,
        };
        workspace.write_config(&TestFixtures::initial_config());
        workspace
    }

    /// Same as `new`, with the archive already cached
    pub fn with_cached_archive() -> Self {
        let workspace = Self::new();
        std::fs::write(workspace.archive_path(), b"cached").expect("write cached archive");
        workspace
    }

    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(TestFixtures::ARCHIVE_NAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.work_dir.join(TestFixtures::CONFIG_PATH)
    }

    pub fn write_config(&self, document: &Value) {
        let text = serde_json::to_string_pretty(document).expect("serialize config");
        std::fs::write(self.config_path(), text).expect("write config");
    }

    pub fn read_config(&self) -> Value {
        let text = std::fs::read_to_string(self.config_path()).expect("read config");
        serde_json::from_str(&text).expect("config is valid JSON")
    }

    pub fn settings(&self) -> RunSettings {
        TestFixtures::settings(&self.work_dir, &self.tool_base)
    }

    /// Canonical tool base, as the orchestrator reports it
    pub fn canonical_tool_base(&self) -> PathBuf {
        self.tool_base.canonicalize().expect("canonical tool base")
    }
}
