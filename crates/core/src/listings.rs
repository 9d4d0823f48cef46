// Filtered listing search

use crate::endpoint::{encode_component, Endpoint};
use crate::error::{QueryError, Resource};
use crate::fetch::{fetch_json, Fetcher};
use crate::filters::{FilterSet, FilterValue};
use serde_json::Value;

/// Encoded `name=value` pairs, `property_for` first, the rest in schema order.
pub fn query_parts(filters: &FilterSet) -> Vec<String> {
    let mut parts = Vec::with_capacity(filters.len());

    if let Some(category) = filters.category() {
        parts.push(format!("property_for={}", encode_component(category.as_str())));
    }

    parts.extend(
        filters
            .iter()
            .filter(|(_, value)| !matches!(value, FilterValue::Category(_)))
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    encode_component(name),
                    encode_component(&value.to_query_value())
                )
            }),
    );

    parts
}

/// `<base>/properties`, with `?<query>` only when at least one filter is set.
pub fn listing_url(endpoint: &Endpoint, filters: &FilterSet) -> String {
    let query = query_parts(filters).join("&");
    if query.is_empty() {
        endpoint.properties()
    } else {
        format!("{}?{}", endpoint.properties(), query)
    }
}

/// Search listings matching `filters` and return the upstream JSON unchanged.
pub async fn fetch_listings(
    fetcher: &dyn Fetcher,
    endpoint: &Endpoint,
    filters: &FilterSet,
) -> Result<Value, QueryError> {
    let url = listing_url(endpoint, filters);
    fetch_json(fetcher, &url, Resource::Properties).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchResponse, RecordingFetcher};
    use serde_json::json;

    fn filters(arguments: Value) -> FilterSet {
        FilterSet::from_arguments(&arguments).unwrap()
    }

    #[test]
    fn test_no_filters_gives_bare_url() {
        let endpoint = Endpoint::default();
        assert_eq!(
            listing_url(&endpoint, &FilterSet::new()),
            "https://cariari.agency/api/properties"
        );

        let all_empty = filters(json!({
            "property_for": "",
            "price_max": null,
            "contact_realtor": "",
            "msl": ""
        }));
        assert_eq!(
            listing_url(&endpoint, &all_empty),
            "https://cariari.agency/api/properties"
        );
    }

    #[test]
    fn test_price_and_beds() {
        let url = listing_url(
            &Endpoint::default(),
            &filters(json!({"price_max": 300000, "beds_min": 2})),
        );
        assert_eq!(
            url,
            "https://cariari.agency/api/properties?price_max=300000&beds_min=2"
        );
    }

    #[test]
    fn test_property_for_first_and_capitalized() {
        let url = listing_url(
            &Endpoint::default(),
            &filters(json!({"beds_min": 3, "property_for": "RENT", "rent_max": "1500"})),
        );
        assert_eq!(
            url,
            "https://cariari.agency/api/properties?property_for=Rent&rent_max=1500&beds_min=3"
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let parts = query_parts(&filters(json!({
            "contact_realtor": "Ana & Luis",
            "contact_email": "info@cariari.agency"
        })));
        assert_eq!(
            parts,
            vec![
                "contact_realtor=Ana%20%26%20Luis".to_string(),
                "contact_email=info%40cariari.agency".to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_price_is_sent_as_zero() {
        let url = listing_url(
            &Endpoint::default(),
            &filters(json!({"price_max": "  ", "beds_min": 2})),
        );
        assert_eq!(
            url,
            "https://cariari.agency/api/properties?price_max=0&beds_min=2"
        );
    }

    #[test]
    fn test_sort_and_order() {
        let url = listing_url(
            &Endpoint::parse("http://localhost:3000/api/").unwrap(),
            &filters(json!({"order": "desc", "sort": "price"})),
        );
        assert_eq!(url, "http://localhost:3000/api/properties?sort=price&order=desc");
    }

    #[test]
    fn test_url_is_stable_across_calls() {
        let endpoint = Endpoint::default();
        let set = filters(json!({"property_for": "sale", "land_use": "residencial"}));
        let first = listing_url(&endpoint, &set);
        let second = listing_url(&endpoint, &set);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_listings_passes_body_through() {
        let body = json!([{"id": "cr-001", "price": 250000}, {"id": "cr-002", "price": 180000}]);
        let fetcher = RecordingFetcher::new(FetchResponse::json(&body));

        let result = fetch_listings(
            &fetcher,
            &Endpoint::default(),
            &filters(json!({"price_max": 300000})),
        )
        .await
        .unwrap();

        assert_eq!(result, body);
        assert_eq!(
            fetcher.last_url().unwrap(),
            "https://cariari.agency/api/properties?price_max=300000"
        );
    }

    #[tokio::test]
    async fn test_fetch_listings_status_error() {
        let fetcher =
            RecordingFetcher::new(FetchResponse::new(500, "Internal Server Error", "oops"));

        let err = fetch_listings(&fetcher, &Endpoint::default(), &FilterSet::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error fetching properties: 500 Internal Server Error"
        );
    }
}
