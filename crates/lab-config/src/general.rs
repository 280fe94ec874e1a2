//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_keyring_service() -> String {
    "codelab-cli".to_string()
}

const fn default_auto_open() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Keychain service name for the generation credential.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Whether preview commands open a browser.
    #[serde(default = "default_auto_open")]
    pub auto_open: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            auto_open: default_auto_open(),
        }
    }
}
