//! Local cache slot and export file settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_cache_key() -> String {
    "academy-codelab-web".to_string()
}

fn default_export_file_name() -> String {
    "Code-web.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the cache slot. Empty means the platform data dir.
    #[serde(default)]
    pub cache_dir: String,

    /// Name of the single local cache slot.
    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// File name offered for project export.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: String::new(),
            cache_key: default_cache_key(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl StorageConfig {
    /// Directory for the cache slot: the configured one, else
    /// `<data_local_dir>/codelab`.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        if self.cache_dir.trim().is_empty() {
            dirs::data_local_dir().map(|dir| dir.join("codelab"))
        } else {
            Some(PathBuf::from(&self.cache_dir))
        }
    }
}
