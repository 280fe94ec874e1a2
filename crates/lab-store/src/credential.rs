//! Storage for the generation API key.
//!
//! [`KeyringCredentialStore`] writes to the OS keychain and falls back to a
//! `0600` file when the keychain is unavailable or does not retain the value.
//! Tier order on load: keychain, then file.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;

const KEYRING_USER: &str = "gemini-api-key";
const CREDENTIALS_FILE_NAME: &str = "gemini_api_key";

/// Pluggable store for a single secret.
pub trait CredentialStore: Send + Sync {
    /// The stored secret, if any. Blank values read as absent.
    fn load(&self) -> Option<String>;

    /// Persist `secret`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credential`] if no tier accepted the value.
    fn store(&self, secret: &str) -> Result<(), StoreError>;

    /// Remove the secret from every tier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credential`] if the fallback file cannot be removed.
    fn delete(&self) -> Result<(), StoreError>;

    /// Which tier currently holds the secret (for status display).
    fn source(&self) -> Option<&'static str>;
}

/// OS keychain with a file fallback.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
    file: PathBuf,
}

impl KeyringCredentialStore {
    /// Store under `service`, falling back to `~/.codelab/gemini_api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credential`] if the home directory is unknown.
    pub fn new(service: impl Into<String>) -> Result<Self, StoreError> {
        let file = dirs::home_dir()
            .map(|home| home.join(".codelab").join(CREDENTIALS_FILE_NAME))
            .ok_or_else(|| {
                StoreError::Credential("home directory not found, cannot store credentials".into())
            })?;
        Ok(Self::with_file(service, file))
    }

    /// Store under `service` with an explicit fallback file.
    #[must_use]
    pub fn with_file(service: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            service: service.into(),
            file: file.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &std::path::Path {
        &self.file
    }

    fn entry(&self) -> Option<keyring::Entry> {
        keyring::Entry::new(&self.service, KEYRING_USER)
            .map_err(|error| tracing::debug!(%error, "keyring unavailable"))
            .ok()
    }

    fn load_keyring(&self) -> Option<String> {
        self.entry()?
            .get_password()
            .ok()
            .filter(|secret| !secret.trim().is_empty())
    }

    fn load_file(&self) -> Option<String> {
        fs::read_to_string(&self.file)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn store_file(&self, secret: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Credential(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.file, secret)
            .map_err(|e| StoreError::Credential(format!("write {}: {e}", self.file.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.file, fs::Permissions::from_mode(0o600)).map_err(|e| {
                StoreError::Credential(format!("chmod {}: {e}", self.file.display()))
            })?;
        }

        Ok(())
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load(&self) -> Option<String> {
        self.load_keyring().or_else(|| self.load_file())
    }

    fn store(&self, secret: &str) -> Result<(), StoreError> {
        let secret = secret.trim();
        if let Some(entry) = self.entry() {
            match entry.set_password(secret) {
                // Some backends accept writes without persisting them.
                Ok(()) if self.load_keyring().as_deref() == Some(secret) => return Ok(()),
                Ok(()) => tracing::warn!("keyring did not retain secret; falling back to file"),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.store_file(secret)
    }

    fn delete(&self) -> Result<(), StoreError> {
        if let Some(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        if self.file.exists() {
            fs::remove_file(&self.file).map_err(|e| {
                StoreError::Credential(format!("failed to delete {}: {e}", self.file.display()))
            })?;
        }
        Ok(())
    }

    fn source(&self) -> Option<&'static str> {
        if self.load_keyring().is_some() {
            return Some("keyring");
        }
        if self.load_file().is_some() {
            return Some("file");
        }
        None
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    secret: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Mutex::new(Some(secret.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.secret
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.slot().clone().filter(|s| !s.trim().is_empty())
    }

    fn store(&self, secret: &str) -> Result<(), StoreError> {
        *self.slot() = Some(secret.trim().to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }

    fn source(&self) -> Option<&'static str> {
        self.load().map(|_| "memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(tmp: &tempfile::TempDir) -> KeyringCredentialStore {
        let service = format!("codelab-cli-test-{}", std::process::id());
        KeyringCredentialStore::with_file(service, tmp.path().join("creds").join("key"))
    }

    #[test]
    fn default_file_is_under_home() {
        let store = KeyringCredentialStore::new("codelab-cli").expect("home dir");
        assert!(store.file_path().ends_with(".codelab/gemini_api_key"));
    }

    #[test]
    fn keyring_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = test_store(&tmp);

        store.store("  AIza-test-key \n").expect("store");
        assert_eq!(store.load().as_deref(), Some("AIza-test-key"));
        assert!(store.source().is_some());

        store.delete().expect("delete");
        assert!(store.load().is_none());
        assert!(store.source().is_none());
        assert!(!store.file_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_fallback_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = test_store(&tmp);
        store.store_file("secret").expect("store file");

        let mode = fs::metadata(store.file_path())
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600, "credentials file should be 0600");
        store.delete().expect("delete");
    }

    #[test]
    fn whitespace_only_file_reads_as_absent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = test_store(&tmp);
        fs::create_dir_all(store.file_path().parent().expect("parent")).expect("mkdir");
        fs::write(store.file_path(), "   \n  ").expect("write");
        assert!(store.load_file().is_none());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::default();
        assert!(store.load().is_none());
        store.store("k").expect("store");
        assert_eq!(store.load().as_deref(), Some("k"));
        assert_eq!(store.source(), Some("memory"));
        store.delete().expect("delete");
        assert!(store.load().is_none());
    }
}
