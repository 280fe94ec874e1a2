//! Project persistence: one cache slot plus a downloadable export.

use std::path::PathBuf;

use lab_core::entities::ProjectDocument;

use crate::error::StoreError;
use crate::export::ExportSink;
use crate::slot::CacheSlot;

/// Outcome of [`ProjectStore::save`]. The export is attempted even when the
/// cache write fails, so both halves are reported.
#[derive(Debug)]
pub struct SaveReport {
    pub cached: Result<(), StoreError>,
    pub exported: Result<PathBuf, StoreError>,
}

impl SaveReport {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.cached.is_ok() && self.exported.is_ok()
    }

    /// First failure, cache before export.
    ///
    /// # Errors
    ///
    /// Returns the cache error if the cache write failed, else the export error.
    pub fn into_result(self) -> Result<PathBuf, StoreError> {
        self.cached?;
        self.exported
    }
}

/// Where the startup document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupSource {
    Cache,
    /// Slot was empty.
    Starter,
    /// Slot held something unusable; it is left untouched.
    StarterAfterError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Startup {
    pub document: ProjectDocument,
    pub source: StartupSource,
}

/// Parse and normalize raw project bytes.
///
/// # Errors
///
/// Returns [`StoreError::Parse`] if `bytes` are not JSON and
/// [`StoreError::InvalidInput`] if the JSON is not an object.
pub fn decode(bytes: &[u8]) -> Result<ProjectDocument, StoreError> {
    let raw: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(lab_schema::normalize(&raw)?)
}

/// Save/load gateway over a [`CacheSlot`] and an [`ExportSink`].
pub struct ProjectStore {
    slot: Box<dyn CacheSlot>,
    export: Box<dyn ExportSink>,
    export_file_name: String,
}

impl ProjectStore {
    #[must_use]
    pub fn new(
        slot: Box<dyn CacheSlot>,
        export: Box<dyn ExportSink>,
        export_file_name: impl Into<String>,
    ) -> Self {
        Self {
            slot,
            export,
            export_file_name: export_file_name.into(),
        }
    }

    #[must_use]
    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }

    /// Write `doc` as pretty JSON to the slot, then offer the same bytes to
    /// the export sink.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Parse`] only if the document cannot be
    /// serialized. Slot and export failures are carried in the report.
    pub fn save(&mut self, doc: &ProjectDocument) -> Result<SaveReport, StoreError> {
        let text = serde_json::to_string_pretty(doc)?;

        let cached = self.slot.write(&text);
        if let Err(error) = &cached {
            tracing::warn!(%error, "cache write failed; still exporting");
        }
        let exported = self.export.offer(&self.export_file_name, text.as_bytes());
        if let Err(error) = &exported {
            tracing::warn!(%error, "export failed");
        }

        Ok(SaveReport { cached, exported })
    }

    /// Decode external bytes. Does not touch the slot.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn load(&self, bytes: &[u8]) -> Result<ProjectDocument, StoreError> {
        decode(bytes)
    }

    /// Normalized contents of the slot, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns read, parse, or normalization errors for a populated slot.
    pub fn load_cached(&self) -> Result<Option<ProjectDocument>, StoreError> {
        self.slot
            .read()?
            .map(|text| decode(text.as_bytes()))
            .transpose()
    }

    /// Document to show at startup: the cached project, or the starter.
    #[must_use]
    pub fn startup(&self) -> Startup {
        match self.load_cached() {
            Ok(Some(document)) => Startup {
                document,
                source: StartupSource::Cache,
            },
            Ok(None) => Startup {
                document: ProjectDocument::starter(),
                source: StartupSource::Starter,
            },
            Err(error) => {
                tracing::warn!(%error, slot = %self.slot.describe(), "ignoring unusable cache slot");
                Startup {
                    document: ProjectDocument::starter(),
                    source: StartupSource::StarterAfterError(error.to_string()),
                }
            }
        }
    }
}
