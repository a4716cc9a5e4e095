//! HTTP dataset download
//!
//! The archive is streamed into a temporary file next to its destination and
//! only renamed into place once the body has been fully written. An
//! interrupted transfer therefore never leaves a partial archive behind for
//! the presence check to mistake for a cached copy.

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::services::parent_dir;
use crate::traits::DatasetSource;
use shared::{step_debug, RunStep};

/// Real dataset source backed by reqwest
pub struct RealDatasetSource {
    client: reqwest::Client,
}

impl RealDatasetSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn download_error(url: &str, message: impl Into<String>) -> OrchestratorError {
        OrchestratorError::DownloadFailed {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

impl Default for RealDatasetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetSource for RealDatasetSource {
    async fn download(&self, url: &str, destination: &Path) -> OrchestratorResult<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::download_error(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::download_error(url, format!("HTTP {status}")));
        }

        let staging = tempfile::Builder::new()
            .prefix(".download-")
            .tempfile_in(parent_dir(destination))?;
        let (file, staging_path) = staging.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Self::download_error(url, e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        staging_path
            .persist(destination)
            .map_err(|e| OrchestratorError::file_system("persist_archive", destination.display(), e.error))?;

        step_debug!(RunStep::Fetch, "⬇️  Wrote {} bytes to {}", written, destination.display());
        Ok(written)
    }
}
