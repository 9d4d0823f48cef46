use crate::error::{FetchError, QueryError, Resource};
use bytes::Bytes;
use serde_json::Value;

/// Raw upstream response, independent of the HTTP client in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Reason phrase as supplied by the transport (may be empty)
    pub status_text: String,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// 200 OK with a JSON body
    pub fn json(value: &Value) -> Self {
        Self::new(200, "OK", value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to issue a single GET request.
///
/// Implementations must not retry; one call is one request.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// GET `url` and map the outcome onto the JSON payload or a `QueryError`.
pub(crate) async fn fetch_json(
    fetcher: &dyn Fetcher,
    url: &str,
    resource: Resource,
) -> Result<Value, QueryError> {
    tracing::debug!(url = %url, %resource, "GET request");

    let response = fetcher.get(url).await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Upstream request failed");
        e
    })?;

    if !response.is_success() {
        tracing::warn!(
            url = %url,
            status = response.status,
            "Upstream returned an error status"
        );
        return Err(QueryError::Status {
            resource,
            status: response.status,
            reason: response.status_text,
        });
    }

    Ok(serde_json::from_slice(&response.body)?)
}

#[cfg(any(test, feature = "test-util"))]
pub use recording::RecordingFetcher;

#[cfg(any(test, feature = "test-util"))]
mod recording {
    use super::{FetchResponse, Fetcher};
    use crate::error::FetchError;
    use std::sync::Mutex;

    /// Test double that records requested URLs and replays one canned outcome.
    pub struct RecordingFetcher {
        outcome: Result<FetchResponse, FetchError>,
        urls: Mutex<Vec<String>>,
    }

    impl RecordingFetcher {
        pub fn new(response: FetchResponse) -> Self {
            Self {
                outcome: Ok(response),
                urls: Mutex::new(Vec::new()),
            }
        }

        /// Answers every request with `[]`
        pub fn empty() -> Self {
            Self::new(FetchResponse::json(&serde_json::json!([])))
        }

        pub fn failing(error: FetchError) -> Self {
            Self {
                outcome: Err(error),
                urls: Mutex::new(Vec::new()),
            }
        }

        pub fn urls(&self) -> Vec<String> {
            self.urls.lock().map(|u| u.clone()).unwrap_or_default()
        }

        pub fn last_url(&self) -> Option<String> {
            self.urls().pop()
        }
    }

    #[async_trait::async_trait]
    impl Fetcher for RecordingFetcher {
        async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
            if let Ok(mut urls) = self.urls.lock() {
                urls.push(url.to_string());
            }
            self.outcome.clone()
        }
    }
}
