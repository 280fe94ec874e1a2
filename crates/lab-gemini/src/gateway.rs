//! Model fallback walk.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::GenerationError;
use crate::prompt::{build_prompt, request_body};
use crate::response::{GeneratedCode, extract_text, parse_generated};
use crate::transport::Transport;

/// Clears the in-flight flag on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Generation gateway. At most one request is in flight per gateway.
pub struct GenerationGateway<T> {
    transport: T,
    models: Vec<String>,
    in_flight: AtomicBool,
}

impl<T: Transport> GenerationGateway<T> {
    #[must_use]
    pub const fn new(transport: T, models: Vec<String>) -> Self {
        Self {
            transport,
            models,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Whether a request is currently running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generate pane sources for `task`.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Busy`] if another request is in flight.
    /// - The first non-retryable transport error, without trying further models.
    /// - [`GenerationError::Unavailable`] if every model was not found or rate limited.
    /// - [`GenerationError::EmptyResponse`] / [`GenerationError::MalformedOutput`]
    ///   if the successful response cannot be used.
    pub async fn generate(&self, task: &str, api_key: &str) -> Result<GeneratedCode, GenerationError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(GenerationError::Busy)?;
        let body = request_body(&build_prompt(task));

        let mut last: Option<GenerationError> = None;
        for model in &self.models {
            match self.transport.send(model, api_key, &body).await {
                Ok(response) => {
                    tracing::info!(%model, "generation succeeded");
                    let text = extract_text(&response)?;
                    return parse_generated(&text);
                }
                Err(error) if error.is_retryable() => {
                    tracing::warn!(%model, %error, "model unavailable; trying next");
                    last = Some(error);
                }
                Err(error) => {
                    tracing::warn!(%model, %error, "generation failed");
                    return Err(error);
                }
            }
        }

        Err(GenerationError::Unavailable {
            attempts: self.models.len(),
            last: last.map_or_else(|| "no models configured".to_string(), |e| e.to_string()),
        })
    }
}
