//! reqwest-backed fetch capability.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use bytes::Bytes;
use cariari_core::{FetchError, FetchResponse, Fetcher};
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use tracing::trace;

/// Issues plain GET requests with a shared reqwest client.
///
/// No retries; the client's connection pool is the only reuse.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        trace!(status = status.as_u16(), "Response received");

        // hyper only records the phrase when it differs from the canonical one
        let status_text = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .or_else(|| status.canonical_reason())
            .unwrap_or_default()
            .to_string();

        // Error bodies are never surfaced, skip reading them
        let body = if status.is_success() {
            response
                .bytes()
                .await
                .map_err(|e| FetchError::Body(e.to_string()))?
        } else {
            Bytes::new()
        };

        Ok(FetchResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
