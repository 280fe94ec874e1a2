//! The typed host/sandbox bridge message.

use chrono::{DateTime, Utc};
use lab_core::entities::LogEntry;
use lab_core::enums::Severity;
use serde::{Deserialize, Serialize};

use crate::error::PreviewError;

/// Channel tag every relay message must carry.
pub const RELAY_CHANNEL: &str = "codelab-console";

/// Largest relay body accepted from the host page.
pub const MAX_RELAY_BYTES: usize = 64 * 1024;

/// One console line forwarded out of the sandbox. Fire-and-forget: nothing
/// is ever sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayMessage {
    pub channel: String,
    pub level: Severity,
    pub message: String,
}

impl RelayMessage {
    #[must_use]
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            channel: RELAY_CHANNEL.to_string(),
            level,
            message: message.into(),
        }
    }

    /// Parse and check a relay body.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::TooLarge`] for oversized bodies,
    /// [`PreviewError::NotAnObject`] for non-object payloads,
    /// [`PreviewError::MalformedRelay`] when the object does not have the
    /// fixed shape, and [`PreviewError::UnknownChannel`] for a foreign channel tag.
    pub fn parse(body: &[u8]) -> Result<Self, PreviewError> {
        if body.len() > MAX_RELAY_BYTES {
            return Err(PreviewError::TooLarge(body.len()));
        }
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(PreviewError::NotAnObject);
        }
        let message: Self = serde_json::from_value(value)?;
        if message.channel != RELAY_CHANNEL {
            return Err(PreviewError::UnknownChannel(message.channel));
        }
        Ok(message)
    }

    #[must_use]
    pub fn into_entry(self, at: DateTime<Utc>) -> LogEntry {
        LogEntry::at(at, self.level, self.message)
    }
}
