//! # Cariari client
//!
//! HTTP client for the Cariari Agency property listing API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cariari_client::{CariariClient, ClientResult, FilterSet};
//!
//! #[tokio::main]
//! async fn main() -> ClientResult<()> {
//!     let client = CariariClient::builder().build()?;
//!
//!     let filters = FilterSet::new()
//!         .with("property_for", "sale")?
//!         .with("price_max", 300000)?;
//!     let listings = client.properties().list(&filters).await?;
//!     println!("{}", serde_json::to_string_pretty(&listings)?);
//!
//!     let property = client.properties().get("cr-001").await?;
//!     println!("{}", property);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{CariariClient, CariariClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use transport::HttpFetcher;

// Re-export core types for convenience
pub use cariari_core::{
    Endpoint, FetchError, FetchResponse, Fetcher, FilterError, FilterSet, FilterValue,
    PropertyCategory, PropertyIdentifier, QueryError, DEFAULT_BASE_URL,
};
