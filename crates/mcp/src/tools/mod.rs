pub mod properties;
pub mod property;
mod registry;

pub use properties::GetPropertiesTool;
pub use property::GetPropertyTool;
pub use registry::{
    json_schema_enum, json_schema_number, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};

use crate::protocol::CallToolResult;
use cariari_client::ClientResult;
use serde_json::Value;

/// Render an upstream outcome as tool output: 2-space indented JSON, or the error text.
pub(crate) fn query_result(outcome: ClientResult<Value>) -> CallToolResult {
    match outcome {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => CallToolResult::text(json),
            Err(e) => CallToolResult::error(format!("Error: {}", e)),
        },
        Err(e) => CallToolResult::error(e.to_string()),
    }
}
