//! Pane, severity, and project-kind enums for codelab.
//!
//! All enums serialize as lowercase strings. `Pane` carries the fixed
//! three-element ordering used by cyclic tab navigation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Pane
// ---------------------------------------------------------------------------

/// One of the three source-editing surfaces.
///
/// ```text
/// markup → style → script → markup   (next)
/// markup → script → style → markup   (previous)
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    #[default]
    Markup,
    Style,
    Script,
}

impl Pane {
    /// Tab order. Navigation wraps around at both ends.
    pub const ORDER: [Self; 3] = [Self::Markup, Self::Style, Self::Script];

    /// Position in [`Pane::ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Markup => 0,
            Self::Style => 1,
            Self::Script => 2,
        }
    }

    /// The pane after this one, wrapping from script back to markup.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// The pane before this one, wrapping from markup back to script.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Style => "style",
            Self::Script => "script",
        }
    }

    /// Project document field holding this pane's source.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "js",
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pane {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" | "html" => Ok(Self::Markup),
            "style" | "css" => Ok(Self::Style),
            "script" | "js" | "javascript" => Ok(Self::Script),
            _ => Err(CoreError::UnknownPane(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a host log entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(CoreError::UnknownSeverity(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectKind
// ---------------------------------------------------------------------------

/// Discriminator for the project document. Only markup/style/script
/// projects exist today; the field is reserved for other kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProjectKind {
    #[default]
    #[serde(rename = "web-only")]
    WebOnly,
}

impl ProjectKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebOnly => "web-only",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
