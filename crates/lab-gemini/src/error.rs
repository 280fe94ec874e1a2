//! Generation error types.

use thiserror::Error;

/// Errors from the generation gateway.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP transport error (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model identifier is unknown to the service (404).
    #[error("model {model} not found")]
    ModelNotFound { model: String },

    /// The service returned 429 Too Many Requests.
    #[error("model {model} is rate limited")]
    RateLimited {
        model: String,
        /// Value of `Retry-After`, when the service sent one.
        retry_after_secs: Option<u64>,
    },

    /// The service rejected the API key.
    #[error("API key rejected ({status}): {message}")]
    Authorization { status: u16, message: String },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Success response without generated text.
    #[error("No response generated")]
    EmptyResponse,

    /// Generated text was not a JSON object.
    #[error("generated output is not valid JSON: {0}")]
    MalformedOutput(String),

    /// Every model was tried and none succeeded.
    #[error("All models failed ({attempts} tried); last error: {last}")]
    Unavailable { attempts: usize, last: String },

    /// A request is already in flight on this gateway.
    #[error("a generation request is already in progress")]
    Busy,
}

impl GenerationError {
    /// Whether the next model should be tried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. } | Self::RateLimited { .. })
    }

    /// Whether the stored credential should be discarded.
    #[must_use]
    pub const fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }
}
