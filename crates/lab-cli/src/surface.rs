//! Preview surfaces for the command line.

use std::io::Write;
use std::path::PathBuf;

use lab_workbench::{PreviewSurface, WorkbenchError};

/// Where [`CliSurface::render`] sends documents.
#[derive(Debug, Clone)]
pub enum RenderTarget {
    Stdout,
    File(PathBuf),
    /// Rendering happens only as a side effect of another command.
    Discard,
}

/// Writes rendered documents to a target and opens detached previews in
/// the browser via a kept temporary file.
#[derive(Debug)]
pub struct CliSurface {
    target: RenderTarget,
    opened: Vec<PathBuf>,
}

impl CliSurface {
    pub const fn new(target: RenderTarget) -> Self {
        Self {
            target,
            opened: Vec::new(),
        }
    }

    pub fn opened(&self) -> &[PathBuf] {
        &self.opened
    }
}

fn surface_error(action: &str, error: impl std::fmt::Display) -> WorkbenchError {
    WorkbenchError::Surface(format!("{action}: {error}"))
}

impl PreviewSurface for CliSurface {
    fn render(&mut self, document: &str) -> Result<(), WorkbenchError> {
        match &self.target {
            RenderTarget::Stdout => std::io::stdout()
                .lock()
                .write_all(document.as_bytes())
                .map_err(|e| surface_error("write stdout", e)),
            RenderTarget::File(path) => std::fs::write(path, document)
                .map_err(|e| surface_error(&format!("write {}", path.display()), e)),
            RenderTarget::Discard => Ok(()),
        }
    }

    fn open_detached(&mut self, document: &str) -> Result<(), WorkbenchError> {
        let mut file = tempfile::Builder::new()
            .prefix("codelab-preview-")
            .suffix(".html")
            .tempfile()
            .map_err(|e| surface_error("create preview file", e))?;
        file.write_all(document.as_bytes())
            .map_err(|e| surface_error("write preview file", e))?;
        // The browser reads the file after we exit.
        let (_, path) = file.keep().map_err(|e| surface_error("keep preview file", e))?;

        open::that(&path).map_err(|e| surface_error(&format!("open {}", path.display()), e))?;
        self.opened.push(path);
        Ok(())
    }
}
