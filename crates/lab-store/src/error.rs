use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Bytes were not valid JSON.
    #[error("invalid project file: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON was valid but not a project document.
    #[error(transparent)]
    InvalidInput(#[from] lab_schema::SchemaError),

    /// The cache slot rejected a write.
    #[error("cache write failed for {slot}: {message}")]
    PersistenceWrite { slot: String, message: String },

    /// The cache slot exists but could not be read.
    #[error("cache read failed for {slot}: {message}")]
    CacheRead { slot: String, message: String },

    /// The export file could not be written.
    #[error("export failed for {target}: {message}")]
    Export { target: String, message: String },

    #[error("credential store error: {0}")]
    Credential(String),
}
