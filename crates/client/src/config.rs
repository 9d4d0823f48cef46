//! Configuration types for the Cariari client.

use cariari_core::Endpoint;
use std::time::Duration;

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("cariari-mcp/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Cariari client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the listing API.
    pub endpoint: Endpoint,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    /// Value sent as `User-Agent`.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}
