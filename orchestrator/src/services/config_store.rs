//! JSON configuration file store
//!
//! Replacement writes go to a temporary file in the same directory followed
//! by a rename, so readers only ever see the old or the new document.

use async_trait::async_trait;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::services::parent_dir;
use crate::traits::ConfigStore;

/// Real configuration store on the local file system
#[derive(Debug, Default, Clone)]
pub struct RealConfigStore;

impl RealConfigStore {
    pub fn new() -> Self {
        Self
    }

    fn render(document: &Value) -> OrchestratorResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn write_atomic(path: PathBuf, bytes: Vec<u8>) -> OrchestratorResult<()> {
        let mut staging = tempfile::Builder::new()
            .prefix(".config-")
            .suffix(".json")
            .tempfile_in(parent_dir(&path))?;
        // The staging file is created 0600; carry over the original mode
        if let Ok(metadata) = std::fs::metadata(&path) {
            staging
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| OrchestratorError::file_system("replace_config", path.display(), e))?;
        }
        staging.write_all(&bytes)?;
        staging.as_file().sync_all()?;

        staging
            .persist(&path)
            .map_err(|e| OrchestratorError::file_system("replace_config", path.display(), e.error))?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for RealConfigStore {
    async fn load(&self, path: &Path) -> OrchestratorResult<Value> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OrchestratorError::file_system("read_config", path.display(), e))?;

        serde_json::from_str(&contents).map_err(|e| OrchestratorError::PatchFailed {
            path: path.display().to_string(),
            message: format!("not valid JSON: {e}"),
        })
    }

    async fn replace(&self, path: &Path, document: &Value) -> OrchestratorResult<()> {
        let bytes = Self::render(document)?;
        let target = path.to_path_buf();

        tokio::task::spawn_blocking(move || Self::write_atomic(target, bytes))
            .await
            .map_err(|e| OrchestratorError::PatchFailed {
                path: path.display().to_string(),
                message: format!("writer task failed: {e}"),
            })?
    }
}
