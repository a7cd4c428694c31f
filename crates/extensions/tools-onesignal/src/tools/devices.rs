//! Device (player) tools.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::{ApiRequest, OneSignalClient};
use onesignal_protocols::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{parse_params, path_segment};
use crate::format::{items, pretty, section, text, text_or};

const MAX_DEVICES: u32 = 200;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

#[derive(Debug, Deserialize)]
struct DeviceIdParams {
    device_id: String,
}

pub struct ViewDevicesTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewDevicesTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_devices",
            "View Devices",
            "View devices subscribed to your OneSignal app.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of devices to return (max: 200)",
                    "default": 20
                },
                "offset": {
                    "type": "integer",
                    "description": "Result offset for pagination",
                    "default": 0
                }
            }
        }));
        Self { definition, client }
    }
}

fn render_device(device: &Value) -> String {
    [
        format!("ID: {}", text(device, "id")),
        format!("Device Type: {}", text(device, "device_type")),
        format!("Created: {}", text(device, "created_at")),
        format!("Last Active: {}", text(device, "last_active")),
        format!("Session Count: {}", text(device, "session_count")),
        format!("Platform: {}", text(device, "device_os")),
        format!("Model: {}", text(device, "device_model")),
        format!("Tags: {}", pretty(device.get("tags"))),
    ]
    .join("\n")
}

#[async_trait]
impl Tool for ViewDevicesTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: PageParams = parse_params(params)?;
        let request = ApiRequest::get("players")
            .with_query("limit", params.limit.min(MAX_DEVICES))
            .with_query("offset", params.offset);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api("Error fetching devices", e))?;

        let players = items(&result, "players");
        if players.is_empty() {
            return Ok(ToolResult::success("No devices found."));
        }
        let output = section("Devices", players.iter().map(render_device));
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct ViewDeviceDetailsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewDeviceDetailsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_device_details",
            "View Device Details",
            "Get detailed information about a specific device.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "device_id": {
                    "type": "string",
                    "description": "The ID of the device to retrieve details for"
                }
            },
            "required": ["device_id"]
        }));
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewDeviceDetailsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: DeviceIdParams = parse_params(params)?;
        let device_id = path_segment("device_id", &params.device_id)?;
        let result = self
            .client
            .call(ApiRequest::get(format!("players/{}", device_id)))
            .await
            .map_err(|e| ToolError::api("Error fetching device details", e))?;

        let output = [
            format!("ID: {}", text(&result, "id")),
            format!("External User ID: {}", text_or(&result, "external_user_id", "Not set")),
            format!("Device Type: {}", text(&result, "device_type")),
            format!("Device Model: {}", text(&result, "device_model")),
            format!("Platform: {}", text(&result, "device_os")),
            format!("Created: {}", text(&result, "created_at")),
            format!("Last Active: {}", text(&result, "last_active")),
            format!("Session Count: {}", text(&result, "session_count")),
            format!("Language: {}", text(&result, "language")),
            format!("Timezone: {}", text(&result, "timezone")),
            format!("Country: {}", text(&result, "country")),
            format!("Notification Types: {}", text(&result, "notification_types")),
            format!("Tags: {}", pretty(result.get("tags"))),
        ]
        .join("\n");
        Ok(ToolResult::success_json(output, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_view_devices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players"))
            .and(header("authorization", "Basic k1"))
            .and(query_param("app_id", "a1"))
            .and(query_param("limit", "200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "players": [
                    {"id": "p1", "device_type": 1, "tags": {"level": "10"}},
                    {"id": "p2", "device_os": "17.1"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = ViewDevicesTool::new(test_support::client(&server, None));
        let result = tool
            .execute(json!({"limit": 1000}), ToolContext::new())
            .await
            .unwrap();

        assert!(result.content.starts_with("Devices:\n\nID: p1\nDevice Type: 1"));
        assert!(result.content.contains("\"level\": \"10\""));
        assert!(result.content.contains("ID: p2"));
        assert!(result.content.contains("Platform: 17.1"));
    }

    #[tokio::test]
    async fn test_view_devices_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": []})))
            .mount(&server)
            .await;

        let tool = ViewDevicesTool::new(test_support::client(&server, None));
        let result = tool.execute(json!({}), ToolContext::new()).await.unwrap();
        assert_eq!(result.content, "No devices found.");
    }

    #[tokio::test]
    async fn test_view_device_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players/p1"))
            .and(query_param("app_id", "a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1",
                "language": "en",
                "tags": {}
            })))
            .mount(&server)
            .await;

        let tool = ViewDeviceDetailsTool::new(test_support::client(&server, None));
        let result = tool
            .execute(json!({"device_id": "p1"}), ToolContext::new())
            .await
            .unwrap();
        assert!(result.content.contains("External User ID: Not set"));
        assert!(result.content.contains("Language: en"));
        assert!(result.content.ends_with("Tags: {}"));
    }

    #[tokio::test]
    async fn test_view_device_details_requires_id() {
        let server = MockServer::start().await;
        let tool = ViewDeviceDetailsTool::new(test_support::client(&server, None));
        let err = tool.execute(json!({}), ToolContext::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[tokio::test]
    async fn test_view_device_details_rejects_query_in_id() {
        let server = MockServer::start().await;
        let tool = ViewDeviceDetailsTool::new(test_support::client(&server, None));
        let err = tool
            .execute(json!({"device_id": "p1?app_id=other"}), ToolContext::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
