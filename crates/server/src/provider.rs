//! Model provider client.
//!
//! A check request may arrive without a response payload; the server then
//! asks a [`ModelProvider`] to generate one for the prompt. The only concrete
//! provider is [`HttpProvider`], which POSTs `{"prompt": ...}` to a configured
//! endpoint and hands back whatever JSON comes out. Shape handling is left to
//! the normalizer.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid provider response: {0}")]
    Decode(String),
}

/// Source of raw model responses.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Generate a raw response payload for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError>;

    /// Short label used in logs.
    fn name(&self) -> &str {
        "provider"
    }
}

/// JSON-over-HTTP provider.
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

impl HttpProvider {
    pub fn new(
        url: impl Into<String>,
        auth_header: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            auth_header,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ModelProvider for HttpProvider {
    async fn generate(&self, prompt: &str) -> Result<Value, ProviderError> {
        let mut request = self.client.post(&self.url);
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}
