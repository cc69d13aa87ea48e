//! Local-disk poster storage
//!
//! Files are kept flat in one directory under the name they were uploaded with.
//! Names are restricted to a single path component so nothing can be read or
//! written outside the configured directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::shared::validation::is_safe_file_name;

/// Flat directory of uploaded files
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it doesn't exist yet
    pub async fn ensure_dir_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Resolve `name` to a path inside the storage directory
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !is_safe_file_name(name) {
            return Err(AppError::BadRequest(format!("Invalid file name: '{}'", name)));
        }
        Ok(self.root.join(name))
    }

    /// Write `data` under `name`, replacing any existing file.
    ///
    /// Returns the name the file was stored under.
    pub async fn store(&self, name: &str, data: &[u8]) -> Result<String> {
        let path = self.resolve(name)?;

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, data).await?;

        info!(path = %path.display(), size = data.len(), "Stored file");
        Ok(name.to_string())
    }

    /// Open a stored file for reading, returning it with its length in bytes
    pub async fn open(&self, name: &str) -> Result<(File, u64)> {
        let path = self.resolve(name)?;

        let file = File::open(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::NotFound(format!("File not found: {}", name)),
            _ => AppError::Io(e),
        })?;
        let len = file.metadata().await?.len();

        debug!(path = %path.display(), size = len, "Opened file");
        Ok((file, len))
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    /// Remove `name`; a missing file is not an error.
    ///
    /// Returns whether a file was actually removed.
    pub async fn delete_if_exists(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "Deleted file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "File already absent");
                Ok(false)
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
