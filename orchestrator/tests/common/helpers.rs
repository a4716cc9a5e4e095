//! Test helpers and builder patterns for orchestrator tests
//!
//! This module provides convenient helper functions and builder patterns
//! to reduce test boilerplate and improve maintainability.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use run_orchestrator::services::RealConfigStore;
use run_orchestrator::*;

/// Orchestrator wired entirely to mocks
pub type TestOrchestrator = Orchestrator<MockDatasetSource, MockToolLocator, MockConfigStore, MockProcessRunner>;

/// Orchestrator with mocked network/processes and a real config file
pub type FileBackedOrchestrator =
    Orchestrator<MockDatasetSource, MockToolLocator, RealConfigStore, MockProcessRunner>;

/// Builder pattern for creating test orchestrators with sensible defaults
pub struct OrchestratorBuilder {
    settings: RunSettings,
    dataset: MockDatasetSource,
    locator: MockToolLocator,
    config_store: MockConfigStore,
    runner: MockProcessRunner,
}

impl OrchestratorBuilder {
    /// Create a new builder; mocks start without expectations so any
    /// unexpected call fails the test
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            dataset: MockDatasetSource::new(),
            locator: MockToolLocator::new(),
            config_store: MockConfigStore::new(),
            runner: MockProcessRunner::new(),
        }
    }

    /// Configure the dataset source mock with a setup function
    pub fn with_dataset<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockDatasetSource),
    {
        setup(&mut self.dataset);
        self
    }

    /// Configure the tool locator mock with a setup function
    pub fn with_locator<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockToolLocator),
    {
        setup(&mut self.locator);
        self
    }

    /// Point the tool locator at a fixed directory
    pub fn with_tool_base(self, base: &Path) -> Self {
        let base = base.to_path_buf();
        self.with_locator(move |locator| {
            locator.expect_locate().returning(move || Ok(base.clone()));
        })
    }

    /// Configure the config store mock with a setup function
    pub fn with_config_store<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockConfigStore),
    {
        setup(&mut self.config_store);
        self
    }

    /// Configure the process runner mock with a setup function
    pub fn with_runner<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockProcessRunner),
    {
        setup(&mut self.runner);
        self
    }

    /// Build the orchestrator with all configured mocks
    pub fn build(self) -> TestOrchestrator {
        Orchestrator::new(self.settings, self.dataset, self.locator, self.config_store, self.runner)
    }

    /// Build with the real file-backed config store instead of the mock
    pub fn build_file_backed(self) -> FileBackedOrchestrator {
        Orchestrator::new(
            self.settings,
            self.dataset,
            self.locator,
            RealConfigStore::new(),
            self.runner,
        )
    }
}

/// In-memory config store that records every replacement
#[derive(Clone)]
pub struct MemoryConfigStore {
    pub document: Arc<Mutex<Value>>,
    pub writes: Arc<Mutex<Vec<Value>>>,
}

impl MemoryConfigStore {
    pub fn new(document: Value) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wire this store into a config store mock
    pub fn install(&self, mock: &mut MockConfigStore) {
        let reads = self.clone();
        mock.expect_load()
            .returning(move |_| Ok(reads.document.lock().unwrap().clone()));

        let writes = self.clone();
        mock.expect_replace().returning(move |_, doc| {
            *writes.document.lock().unwrap() = doc.clone();
            writes.writes.lock().unwrap().push(doc.clone());
            Ok(())
        });
    }

    pub fn current(&self) -> Value {
        self.document.lock().unwrap().clone()
    }

    pub fn history(&self) -> Vec<Value> {
        self.writes.lock().unwrap().clone()
    }
}

/// Records every invocation handed to a process runner mock
#[derive(Clone, Default)]
pub struct InvocationLog {
    pub calls: Arc<Mutex<Vec<Invocation>>>,
}

impl InvocationLog {
    /// Answer every run with `code`, recording the invocation
    pub fn install(&self, mock: &mut MockProcessRunner, code: i32) {
        let calls = self.calls.clone();
        mock.expect_run().returning(move |invocation| {
            calls.lock().unwrap().push(invocation.clone());
            Ok(ExitOutcome::from_code(code))
        });
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.program.to_string_lossy().into_owned())
            .collect()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Mock download that writes `body` to the destination, as the real one would
    pub fn install_download(mock: &mut MockDatasetSource, body: &'static [u8], times: usize) {
        mock.expect_download()
            .times(times)
            .returning(move |_, destination| {
                std::fs::write(destination, body)?;
                Ok(body.len() as u64)
            });
    }

    /// Arguments of an invocation, minus the entry script
    pub fn processing_args(invocation: &Invocation) -> Vec<String> {
        invocation.args_lossy().into_iter().skip(1).collect()
    }

    pub fn entry_script(invocation: &Invocation) -> PathBuf {
        PathBuf::from(&invocation.args[0])
    }
}
