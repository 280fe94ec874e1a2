//! Generation service configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_models() -> Vec<String> {
    ["gemini-2.0-flash-exp", "gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// Endpoint prefix; the model id and `:generateContent` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifiers, tried in order.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// API key. When set, the credential store is not consulted.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            models: default_models(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Returns `true` if an API key is supplied by configuration.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
