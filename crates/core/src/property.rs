// Single-property lookup by UUID or MLS code

use crate::endpoint::{encode_component, Endpoint};
use crate::error::{QueryError, Resource};
use crate::fetch::{fetch_json, Fetcher};
use crate::identifier::PropertyIdentifier;
use serde_json::Value;

/// Direct resource URL for a UUID, code search URL for anything else.
pub fn property_url(endpoint: &Endpoint, id: &PropertyIdentifier) -> String {
    match id {
        PropertyIdentifier::Uuid(raw) => {
            format!("{}/{}", endpoint.properties(), encode_component(raw))
        }
        PropertyIdentifier::Code(raw) => {
            format!("{}?msl={}", endpoint.properties(), encode_component(raw))
        }
    }
}

/// Fetch one property. A code lookup may match zero, one or many listings;
/// the upstream payload is returned as-is either way.
pub async fn fetch_property(
    fetcher: &dyn Fetcher,
    endpoint: &Endpoint,
    id: &PropertyIdentifier,
) -> Result<Value, QueryError> {
    let url = property_url(endpoint, id);
    fetch_json(fetcher, &url, Resource::Property).await
}
