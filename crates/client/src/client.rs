//! Main client for the Cariari listing API.

use crate::api::PropertiesApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::HttpFetcher;
use cariari_core::{Endpoint, Fetcher};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the Cariari listing API.
///
/// Cheap to clone; every clone shares the same fetcher.
#[derive(Clone)]
pub struct CariariClient {
    pub(crate) endpoint: Endpoint,
    pub(crate) fetcher: Arc<dyn Fetcher>,
}

impl CariariClient {
    /// Create a new client builder.
    pub fn builder() -> CariariClientBuilder {
        CariariClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            endpoint: config.endpoint,
            fetcher: Arc::new(fetcher),
        })
    }

    /// Create a client around any fetch capability (used to swap in test doubles).
    pub fn with_fetcher(endpoint: Endpoint, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { endpoint, fetcher }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Get the properties API.
    pub fn properties(&self) -> PropertiesApi<'_> {
        PropertiesApi::new(self)
    }
}

/// Builder for creating a CariariClient.
pub struct CariariClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CariariClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL of the listing API. Defaults to the production API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> ClientResult<CariariClient> {
        let endpoint = match self.base_url {
            Some(raw) => {
                let url = Url::parse(&raw)?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(ClientError::Config(format!(
                        "base_url must be http or https, got {}",
                        url.scheme()
                    )));
                }
                Endpoint::parse(url.as_str())?
            }
            None => Endpoint::default(),
        };

        let mut config = ClientConfig::new(endpoint);
        config.timeout = self.timeout;
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }

        CariariClient::from_config(config)
    }
}

impl Default for CariariClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
