// Core query construction for the Cariari Agency listing API

pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod identifier;
pub mod listings;
pub mod property;

pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use error::{FetchError, FilterError, QueryError, Resource};
pub use fetch::{FetchResponse, Fetcher};
pub use filters::{
    EmptyPolicy, FieldKind, FieldSpec, FilterSet, FilterValue, PropertyCategory, LISTING_FILTERS,
};
pub use identifier::PropertyIdentifier;

#[cfg(any(test, feature = "test-util"))]
pub use fetch::RecordingFetcher;
