//! Properties API endpoints.

use crate::client::CariariClient;
use crate::error::ClientResult;
use cariari_core::{listings, property, FilterSet, PropertyIdentifier};
use serde_json::Value;

/// Properties API for listing searches and single-property lookups.
pub struct PropertiesApi<'a> {
    client: &'a CariariClient,
}

impl<'a> PropertiesApi<'a> {
    pub(crate) fn new(client: &'a CariariClient) -> Self {
        Self { client }
    }

    /// Search listings. The upstream JSON is returned unchanged.
    pub async fn list(&self, filters: &FilterSet) -> ClientResult<Value> {
        let value =
            listings::fetch_listings(self.client.fetcher.as_ref(), &self.client.endpoint, filters)
                .await?;
        Ok(value)
    }

    /// Get a property by UUID, or search by MLS code for anything else.
    pub async fn get(&self, id: impl Into<PropertyIdentifier>) -> ClientResult<Value> {
        let id = id.into();
        let value =
            property::fetch_property(self.client.fetcher.as_ref(), &self.client.endpoint, &id)
                .await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::CariariClient;
    use cariari_core::FilterSet;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> CariariClient {
        CariariClient::builder()
            .base_url(format!("{}/api", server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/properties"))
            .and(query_param("property_for", "Sale"))
            .and(query_param("price_max", "300000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "cr-001", "property_for": "Sale", "price": 250000}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let filters = FilterSet::new()
            .with("property_for", "SALE")
            .unwrap()
            .with("price_max", 300000)
            .unwrap();

        let listings = client.properties().list(&filters).await.unwrap();
        assert_eq!(listings[0]["id"], "cr-001");
    }

    #[tokio::test]
    async fn test_get_by_uuid() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/properties/3fa85f64-5717-4562-b3fc-2c963f66afa6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "msl": "cr-001"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let property = client
            .properties()
            .get("3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .await
            .unwrap();
        assert_eq!(property["msl"], "cr-001");
    }

    #[tokio::test]
    async fn test_get_by_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/properties"))
            .and(query_param("msl", "cr-001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.properties().get("cr-001").await.unwrap();
        assert_eq!(result, json!([]));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.properties().get("cr-404").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Error fetching property: 404 Not Found");
    }

    #[tokio::test]
    async fn test_list_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.properties().list(&FilterSet::new()).await.unwrap_err();

        assert!(err.to_string().starts_with("Error: "));
    }
}
