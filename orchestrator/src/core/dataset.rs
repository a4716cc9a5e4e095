//! Demo dataset naming conventions
//!
//! The processing tool is pointed at three data products that live side by
//! side in the extracted dataset directory and share one naming prefix.

use serde::Serialize;
use std::path::PathBuf;
use url::Url;

use crate::error::{OrchestratorError, OrchestratorResult};

/// Remote location of the medium-chunk test dataset
pub const DEFAULT_ARCHIVE_URL: &str = "https://avng.jpl.nasa.gov/pub/PBrodrick/isofit/medium_chunk.tar.gz";

/// Directory the archive expands into
pub const DEFAULT_DATA_DIR: &str = "medium_chunk";

/// Flight line prefix shared by every data product in the chunk
pub const DEFAULT_FILE_BASE: &str = "ang20170323t202244";

/// Row range the chunk was cut from
pub const DEFAULT_CHUNK_SUFFIX: &str = "7k-8k";

/// Naming layout of the extracted dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetLayout {
    pub data_dir: PathBuf,
    pub file_base: String,
    pub suffix: String,
}

impl DatasetLayout {
    pub fn new(data_dir: impl Into<PathBuf>, file_base: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_base: file_base.into(),
            suffix: DEFAULT_CHUNK_SUFFIX.to_string(),
        }
    }

    fn product(&self, kind: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}_{}_{}", self.file_base, kind, self.suffix))
    }

    /// At-sensor radiance cube
    pub fn radiance(&self) -> PathBuf {
        self.product("rdn")
    }

    /// Per-pixel location (lon/lat/elevation)
    pub fn location(&self) -> PathBuf {
        self.product("loc")
    }

    /// Per-pixel observation geometry
    pub fn observation(&self) -> PathBuf {
        self.product("obs")
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_FILE_BASE)
    }
}

/// Validate an archive URL and derive the local file name from its last path segment
pub fn archive_name_from_url(archive_url: &str) -> OrchestratorResult<String> {
    let url = Url::parse(archive_url)
        .map_err(|e| OrchestratorError::config(format!("Invalid archive URL '{archive_url}': {e}")))?;

    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            OrchestratorError::config(format!(
                "Archive URL '{archive_url}' has no file name; pass --archive-name"
            ))
        })
}
