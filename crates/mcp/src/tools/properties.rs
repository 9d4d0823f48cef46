// Listing search tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_enum, json_schema_number, json_schema_object, json_schema_string, query_result,
    Tool,
};
use anyhow::{Context, Result};
use cariari_client::CariariClient;
use cariari_core::{FieldKind, FilterSet, LISTING_FILTERS};

/// `get-properties`: filtered listing search
pub struct GetPropertiesTool {
    client: CariariClient,
}

impl GetPropertiesTool {
    pub const NAME: &'static str = "get-properties";

    pub fn new(client: CariariClient) -> Self {
        Self { client }
    }
}

/// Input schema derived from the filter table
fn input_schema() -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    for spec in LISTING_FILTERS {
        let schema = match spec.kind {
            FieldKind::Number => json_schema_number(spec.description),
            FieldKind::Category | FieldKind::Text => json_schema_string(spec.description),
            FieldKind::Choice(values) => json_schema_enum(values, spec.description),
        };
        properties.insert(spec.name.to_string(), schema);
    }
    json_schema_object(serde_json::Value::Object(properties), vec![])
}

#[async_trait::async_trait]
impl Tool for GetPropertiesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Retrieve a list of property listings with optional filters. Returns properties for sale or rent, with details such as location, price, and features.".to_string(),
            input_schema: input_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let filters = FilterSet::from_arguments(&arguments)
            .context("Invalid arguments for get-properties")?;

        tracing::debug!(filters = filters.len(), "Searching listings");
        Ok(query_result(self.client.properties().list(&filters).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cariari_core::{Endpoint, FetchError, FetchResponse, RecordingFetcher};
    use serde_json::json;
    use std::sync::Arc;

    fn tool_with(fetcher: Arc<RecordingFetcher>) -> GetPropertiesTool {
        GetPropertiesTool::new(CariariClient::with_fetcher(Endpoint::default(), fetcher))
    }

    #[test]
    fn test_schema_lists_every_filter() {
        let tool = tool_with(Arc::new(RecordingFetcher::empty()));
        let schema = tool.schema();

        assert_eq!(schema.name, "get-properties");
        let properties = schema.input_schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 17);
        assert_eq!(properties["price_max"]["type"], "number");
        assert_eq!(properties["contact_email"]["type"], "string");
        assert_eq!(properties["order"]["enum"], json!(["asc", "desc"]));
        assert_eq!(schema.input_schema["required"], json!([]));

        // declared order survives into the schema
        let first = properties.keys().next().unwrap();
        assert_eq!(first, "property_for");
    }

    #[tokio::test]
    async fn test_execute_builds_query_and_pretty_prints() {
        let fetcher = Arc::new(RecordingFetcher::new(FetchResponse::json(&json!([
            {"id": "cr-001", "beds": 3}
        ]))));
        let tool = tool_with(fetcher.clone());

        let result = tool
            .execute(json!({"property_for": "rent", "price_max": 300000, "beds_min": 2, "msl": ""}))
            .await
            .unwrap();

        assert!(result.is_error.is_none());
        assert_eq!(
            result.text_content(),
            "[\n  {\n    \"id\": \"cr-001\",\n    \"beds\": 3\n  }\n]"
        );
        assert_eq!(
            fetcher.last_url().unwrap(),
            "https://cariari.agency/api/properties?property_for=Rent&price_max=300000&beds_min=2"
        );
    }

    #[tokio::test]
    async fn test_execute_without_arguments() {
        let fetcher = Arc::new(RecordingFetcher::empty());
        let tool = tool_with(fetcher.clone());

        let result = tool.execute(json!({})).await.unwrap();

        assert_eq!(result.text_content(), "[]");
        assert_eq!(
            fetcher.last_url().unwrap(),
            "https://cariari.agency/api/properties"
        );
    }

    #[tokio::test]
    async fn test_execute_upstream_error() {
        let fetcher = Arc::new(RecordingFetcher::new(FetchResponse::new(
            502,
            "Bad Gateway",
            "",
        )));
        let tool = tool_with(fetcher);

        let result = tool.execute(json!({"beds_min": 2})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.text_content(),
            "Error fetching properties: 502 Bad Gateway"
        );
    }

    #[tokio::test]
    async fn test_execute_transport_error() {
        let fetcher = Arc::new(RecordingFetcher::failing(FetchError::Transport(
            "operation timed out".to_string(),
        )));
        let tool = tool_with(fetcher);

        let result = tool.execute(json!({})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.text_content(), "Error: operation timed out");
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_arguments() {
        let fetcher = Arc::new(RecordingFetcher::empty());
        let tool = tool_with(fetcher.clone());

        let err = tool.execute(json!({"order": "random"})).await.unwrap_err();

        assert!(format!("{:#}", err).contains("order"));
        assert!(fetcher.urls().is_empty());
    }
}
