//! Error types for the Cariari client.

use cariari_core::{FilterError, QueryError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while building or using a [`crate::CariariClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying reqwest client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Filters did not validate.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The upstream request failed; displays as the tool-facing message.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status returned by upstream, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Query(err) => err.status(),
            _ => None,
        }
    }
}
