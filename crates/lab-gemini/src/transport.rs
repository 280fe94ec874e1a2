//! Request transport.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::GenerationError;
use crate::http::check_response;

/// Sends one `generateContent` request to one model.
pub trait Transport: Send + Sync {
    /// POST `body` to `model`; returns the parsed success body.
    fn send(
        &self,
        model: &str,
        api_key: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, GenerationError>> + Send;
}

/// `reqwest`-backed transport against the public REST endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for `base_url` (the `.../models` prefix).
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if the client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .user_agent("codelab/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Endpoint URL for `model`, with the key as a query parameter.
    #[must_use]
    pub fn endpoint(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(model),
            urlencoding::encode(api_key)
        )
    }
}

impl Transport for HttpTransport {
    async fn send(&self, model: &str, api_key: &str, body: &Value) -> Result<Value, GenerationError> {
        // The key travels in the query string; keep it out of error text.
        let url = self.endpoint(model, api_key);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let resp = check_response(model, resp).await?;
        Ok(resp.json().await.map_err(reqwest::Error::without_url)?)
    }
}
