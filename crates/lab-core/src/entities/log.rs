use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// One line in the host-owned log. Display-only; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::at(Utc::now(), severity, message)
    }

    #[must_use]
    pub fn at(timestamp: DateTime<Utc>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity,
            message: message.into(),
        }
    }
}
