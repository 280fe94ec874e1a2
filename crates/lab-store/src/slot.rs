//! The single local cache slot.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// One named, overwrite-only storage slot. Last writer wins.
pub trait CacheSlot: Send {
    /// Human-readable slot identity for messages.
    fn describe(&self) -> String;

    /// Current contents, or `None` if the slot was never written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CacheRead`] if the slot exists but is unreadable.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the slot's contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PersistenceWrite`] if the write is rejected.
    fn write(&mut self, text: &str) -> Result<(), StoreError>;
}

/// Slot stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileCacheSlot {
    path: PathBuf,
}

impl FileCacheSlot {
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{key}.json")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheSlot for FileCacheSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::CacheRead {
                slot: self.describe(),
                message: error.to_string(),
            }),
        }
    }

    fn write(&mut self, text: &str) -> Result<(), StoreError> {
        let fail = |error: std::io::Error| StoreError::PersistenceWrite {
            slot: self.path.display().to_string(),
            message: error.to_string(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
        fs::write(&self.path, text).map_err(fail)?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "cache slot written");
        Ok(())
    }
}

/// In-memory slot. Can be told to reject writes, as a full quota would.
#[derive(Debug, Clone, Default)]
pub struct MemoryCacheSlot {
    value: Option<String>,
    reject_writes: bool,
}

impl MemoryCacheSlot {
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            reject_writes: false,
        }
    }

    #[must_use]
    pub fn rejecting_writes() -> Self {
        Self {
            value: None,
            reject_writes: true,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl CacheSlot for MemoryCacheSlot {
    fn describe(&self) -> String {
        "memory slot".to_string()
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::PersistenceWrite {
                slot: self.describe(),
                message: "quota exceeded".to_string(),
            });
        }
        self.value = Some(text.to_string());
        Ok(())
    }
}
