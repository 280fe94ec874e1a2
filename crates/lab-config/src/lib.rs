//! # lab-config
//!
//! Layered configuration loading for codelab using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CODELAB_*` prefix, `__` as separator)
//! 2. Project-level `.codelab/config.toml`
//! 3. User-level `~/.config/codelab/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `CODELAB_GEMINI__API_KEY` -> `gemini.api_key`,
//! `CODELAB_STORAGE__CACHE_DIR` -> `storage.cache_dir`, etc.
//!
//! ```no_run
//! use lab_config::CodelabConfig;
//!
//! let config = CodelabConfig::load_with_dotenv().expect("config");
//! println!("models: {:?}", config.gemini.models);
//! ```

mod error;
mod gemini;
mod general;
mod storage;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CodelabConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CodelabConfig {
    /// Load configuration from TOML files and environment variables, then
    /// validate it.
    ///
    /// Does NOT read `.env`; use [`CodelabConfig::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`CodelabConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".codelab/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed("CODELAB_").split("__"))
    }

    /// Reject values the gateways cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.models.is_empty() {
            return Err(invalid("gemini.models", "at least one model id is required"));
        }
        if self.gemini.models.iter().any(|m| m.trim().is_empty()) {
            return Err(invalid("gemini.models", "model ids must not be blank"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(invalid("gemini.timeout_secs", "must be greater than zero"));
        }
        if self.storage.cache_key.trim().is_empty() {
            return Err(invalid("storage.cache_key", "must not be empty"));
        }
        if self.storage.export_file_name.trim().is_empty() {
            return Err(invalid("storage.export_file_name", "must not be empty"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codelab").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
