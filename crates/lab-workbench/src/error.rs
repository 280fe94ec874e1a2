use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    Store(#[from] lab_store::StoreError),

    #[error(transparent)]
    Generation(#[from] lab_gemini::GenerationError),

    /// The preview surface could not show a document.
    #[error("preview surface error: {0}")]
    Surface(String),
}
