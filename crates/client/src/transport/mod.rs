//! Transport layer for the Cariari client.

pub mod http;

pub use http::HttpFetcher;
