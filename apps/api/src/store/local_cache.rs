use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::content::ContentDocument;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cached document is unparsable: {0}")]
    Malformed(serde_json::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(serde_json::Error),
}

/// A single named JSON file holding the last document the owner saved.
///
/// Read on load when the remote store has nothing; written on every save.
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<ContentDocument>, CacheError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(CacheError::Malformed)
    }

    /// Atomically replaces the cache file: the JSON goes to a temp file in the
    /// same directory which is then renamed over the target.
    pub fn write(&self, doc: &ContentDocument) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_vec_pretty(doc).map_err(CacheError::Serialize)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| CacheError::Io(e.error))?;
        Ok(())
    }
}
