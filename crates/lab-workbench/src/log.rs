//! Host log: the ordered, user-visible record of what happened.

use lab_core::entities::LogEntry;
use lab_core::enums::Severity;

/// Append-only (until cleared) sequence of [`LogEntry`] values. Every append
/// is mirrored to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct HostLog {
    entries: Vec<LogEntry>,
}

impl HostLog {
    pub fn push(&mut self, entry: LogEntry) {
        match entry.severity {
            Severity::Info => tracing::info!(target: "codelab::log", "{}", entry.message),
            Severity::Warn => tracing::warn!(target: "codelab::log", "{}", entry.message),
            Severity::Error => tracing::error!(target: "codelab::log", "{}", entry.message),
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogEntry::new(Severity::Error, message));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `[HH:MM:SS] message`, in local time.
#[must_use]
pub fn format_line(entry: &LogEntry) -> String {
    let time = entry.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S");
    format!("[{time}] {}", entry.message)
}
