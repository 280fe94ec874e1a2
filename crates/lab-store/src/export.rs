//! Export targets for saved projects.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Receives the saved bytes under a fixed file name.
pub trait ExportSink: Send {
    /// Offer `bytes` as `file_name`; returns where they ended up.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Export`] if the bytes cannot be written.
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError>;
}

/// Writes exports into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ExportSink for DirectoryExport {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let target = self.dir.join(file_name);
        fs::write(&target, bytes).map_err(|e| StoreError::Export {
            target: target.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(target)
    }
}

/// Keeps exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryExport {
    pub files: Vec<(String, Vec<u8>)>,
}

impl ExportSink for MemoryExport {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
