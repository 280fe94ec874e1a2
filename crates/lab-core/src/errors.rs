//! Cross-cutting error types for codelab.
//!
//! Domain-specific errors (`SchemaError`, `StoreError`, `GenerationError`, ...)
//! live in their respective crates and converge in `lab-workbench`.

use thiserror::Error;

/// Errors that can be raised by any codelab crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A pane name did not match any known pane or alias.
    #[error("unknown pane '{0}' (expected html, css or js)")]
    UnknownPane(String),

    /// A severity name did not match `info`, `warn` or `error`.
    #[error("unknown severity '{0}' (expected info, warn or error)")]
    UnknownSeverity(String),
}
