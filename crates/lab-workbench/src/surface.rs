//! Render targets for composed documents.

use crate::error::WorkbenchError;

/// Where composed documents are shown.
pub trait PreviewSurface: Send {
    /// Replace whatever the surface shows. The previous document's context
    /// is discarded, not signalled.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Surface`] if the document cannot be shown.
    fn render(&mut self, document: &str) -> Result<(), WorkbenchError>;

    /// Show `document` in a new, independent surface.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Surface`] if no surface can be opened.
    fn open_detached(&mut self, document: &str) -> Result<(), WorkbenchError>;
}

/// Keeps rendered documents in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    current: Option<String>,
    renders: usize,
    detached: Vec<String>,
}

impl RecordingSurface {
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub const fn renders(&self) -> usize {
        self.renders
    }

    #[must_use]
    pub fn detached(&self) -> &[String] {
        &self.detached
    }
}

impl PreviewSurface for RecordingSurface {
    fn render(&mut self, document: &str) -> Result<(), WorkbenchError> {
        self.current = Some(document.to_string());
        self.renders += 1;
        Ok(())
    }

    fn open_detached(&mut self, document: &str) -> Result<(), WorkbenchError> {
        self.detached.push(document.to_string());
        Ok(())
    }
}
