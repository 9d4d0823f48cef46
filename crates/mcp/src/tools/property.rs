// Single-property lookup tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, query_result, Tool};
use anyhow::{Context, Result};
use cariari_client::CariariClient;
use cariari_core::PropertyIdentifier;
use serde::Deserialize;

/// `get-property`: fetch one property by UUID or MLS code
pub struct GetPropertyTool {
    client: CariariClient,
}

impl GetPropertyTool {
    pub const NAME: &'static str = "get-property";

    pub fn new(client: CariariClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetPropertyArgs {
    id: String,
}

#[async_trait::async_trait]
impl Tool for GetPropertyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Retrieve details for a single property by its unique ID or MLS number."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "id": json_schema_string("The UUID or MSL number (cr-001) of the property to retrieve")
                }),
                vec!["id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetPropertyArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get-property")?;

        let id = PropertyIdentifier::classify(&args.id);
        tracing::debug!(id = %id, uuid = id.is_uuid(), "Looking up property");

        Ok(query_result(self.client.properties().get(id).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cariari_core::{Endpoint, FetchResponse, RecordingFetcher};
    use serde_json::json;
    use std::sync::Arc;

    fn tool_with(fetcher: Arc<RecordingFetcher>) -> GetPropertyTool {
        GetPropertyTool::new(CariariClient::with_fetcher(Endpoint::default(), fetcher))
    }

    #[test]
    fn test_schema_requires_id() {
        let schema = tool_with(Arc::new(RecordingFetcher::empty())).schema();
        assert_eq!(schema.name, "get-property");
        assert_eq!(schema.input_schema["required"], json!(["id"]));
        assert_eq!(schema.input_schema["properties"]["id"]["type"], "string");
    }

    #[tokio::test]
    async fn test_mls_code_searches_by_msl() {
        let fetcher = Arc::new(RecordingFetcher::empty());
        let tool = tool_with(fetcher.clone());

        tool.execute(json!({"id": "cr-001"})).await.unwrap();

        assert_eq!(
            fetcher.last_url().unwrap(),
            "https://cariari.agency/api/properties?msl=cr-001"
        );
    }

    #[tokio::test]
    async fn test_uuid_fetches_resource() {
        let body = json!({"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "title": "Casa Cariari"});
        let fetcher = Arc::new(RecordingFetcher::new(FetchResponse::json(&body)));
        let tool = tool_with(fetcher.clone());

        let result = tool
            .execute(json!({"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}))
            .await
            .unwrap();

        assert_eq!(
            fetcher.last_url().unwrap(),
            "https://cariari.agency/api/properties/3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        assert_eq!(
            result.text_content(),
            serde_json::to_string_pretty(&body).unwrap()
        );
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let fetcher = Arc::new(RecordingFetcher::new(FetchResponse::new(404, "Not Found", "")));
        let tool = tool_with(fetcher);

        let result = tool.execute(json!({"id": "cr-999"})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.text_content(), "Error fetching property: 404 Not Found");
    }

    #[tokio::test]
    async fn test_repeated_calls_hit_same_url() {
        let fetcher = Arc::new(RecordingFetcher::empty());
        let tool = tool_with(fetcher.clone());

        tool.execute(json!({"id": "cr-001"})).await.unwrap();
        tool.execute(json!({"id": "cr-001"})).await.unwrap();

        let urls = fetcher.urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], urls[1]);
    }

    #[tokio::test]
    async fn test_missing_id_is_rejected() {
        let fetcher = Arc::new(RecordingFetcher::empty());
        let tool = tool_with(fetcher.clone());

        let err = tool.execute(json!({})).await.unwrap_err();

        assert!(format!("{:#}", err).contains("missing field `id`"));
        assert!(fetcher.urls().is_empty());
    }
}
