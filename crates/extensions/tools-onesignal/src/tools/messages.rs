//! Message tools: send, list, inspect and cancel notifications.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::{ApiRequest, OneSignalClient};
use onesignal_protocols::{RiskLevel, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{parse_params, path_segment};
use crate::format::{items, localized, section, text, text_or};

/// Largest page `view_messages` asks for.
const MAX_MESSAGES: u32 = 50;

const CHANNELS: &[&str] = &["push", "email", "sms"];

fn default_segment() -> String {
    "Subscribed Users".to_string()
}

fn default_channel() -> String {
    "push".to_string()
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
struct SendParams {
    title: String,
    message: String,
    #[serde(default = "default_segment")]
    segment: String,
    #[serde(default = "default_channel")]
    target_channel: String,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

#[derive(Debug, Deserialize)]
struct MessageIdParams {
    message_id: String,
}

fn message_id_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "message_id": { "type": "string", "description": description }
        },
        "required": ["message_id"]
    })
}

/// Sends a notification to a segment of the current app.
pub struct SendNotificationTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl SendNotificationTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "send_notification",
            "Send Notification",
            "Send a new push notification through OneSignal.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Notification title" },
                "message": { "type": "string", "description": "Notification message content" },
                "segment": {
                    "type": "string",
                    "description": "Target audience segment",
                    "default": "Subscribed Users"
                },
                "target_channel": {
                    "type": "string",
                    "enum": CHANNELS,
                    "description": "Channel type",
                    "default": "push"
                },
                "data": {
                    "type": "object",
                    "description": "Additional data to include with the notification (optional)"
                }
            },
            "required": ["title", "message"]
        }))
        .with_risk_level(RiskLevel::High);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for SendNotificationTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: SendParams = parse_params(params)?;
        if !CHANNELS.contains(&params.target_channel.as_str()) {
            return Err(ToolError::InvalidParameters(format!(
                "target_channel must be one of {}, got '{}'",
                CHANNELS.join(", "),
                params.target_channel
            )));
        }

        let mut body = json!({
            "target_channel": params.target_channel,
            "included_segments": [params.segment],
            "contents": { "en": params.message },
            "headings": { "en": params.title },
        });
        match params.data {
            None | Some(Value::Null) => {}
            Some(data @ Value::Object(_)) => body["data"] = data,
            Some(_) => {
                return Err(ToolError::InvalidParameters(
                    "data must be a JSON object".to_string(),
                ));
            }
        }

        let request = ApiRequest::post("notifications")
            .with_body(body)
            .use_org_credential(false);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api("Error sending notification", e))?;

        info!(
            correlation_id = %ctx.correlation_id,
            notification = %text(&result, "id"),
            "Notification sent"
        );
        let summary = format!(
            "Notification sent successfully.\nID: {}\nRecipients: {}",
            text(&result, "id"),
            text_or(&result, "recipients", "0")
        );
        Ok(ToolResult::success_json(summary, result))
    }
}

/// Lists recent notifications of the current app.
pub struct ViewMessagesTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewMessagesTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_messages",
            "View Messages",
            "View recent messages sent through OneSignal.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of messages to return (max: 50)",
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

fn render_message(notification: &Value) -> String {
    [
        format!("ID: {}", text(notification, "id")),
        format!("Title: {}", localized(notification, "headings", "No Title")),
        format!("Message: {}", localized(notification, "contents", "No Content")),
        format!("Created: {}", text(notification, "created_at")),
        format!("Sent: {}", text(notification, "sent_at")),
        format!("Status: {}", text_or(notification, "completed_at", "Pending")),
        format!("Successful: {}", text_or(notification, "successful", "0")),
        format!("Failed: {}", text_or(notification, "failed", "0")),
        format!("Remaining: {}", text_or(notification, "remaining", "0")),
    ]
    .join("\n")
}

#[async_trait]
impl Tool for ViewMessagesTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: PageParams = parse_params(params)?;
        let request = ApiRequest::get("notifications")
            .with_query("limit", params.limit.min(MAX_MESSAGES))
            .with_query("offset", params.offset)
            .use_org_credential(false);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api("Error retrieving messages", e))?;

        let notifications = items(&result, "notifications");
        if notifications.is_empty() {
            return Ok(ToolResult::success("No messages found."));
        }
        let output = section("Messages", notifications.iter().map(render_message));
        Ok(ToolResult::success_json(output, result))
    }
}

/// Shows one notification in full.
pub struct ViewMessageDetailsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewMessageDetailsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_message_details",
            "View Message Details",
            "Get detailed information about a specific message.",
        )
        .with_parameters_schema(message_id_schema(
            "The ID of the message to retrieve details for",
        ));
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewMessageDetailsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: MessageIdParams = parse_params(params)?;
        let message_id = path_segment("message_id", &params.message_id)?;
        let request = ApiRequest::get(format!("notifications/{}", message_id))
            .use_org_credential(false);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| ToolError::api("Error retrieving message details", e))?;

        let output = [
            format!("ID: {}", text(&result, "id")),
            format!("App ID: {}", text(&result, "app_id")),
            format!("Title: {}", localized(&result, "headings", "No Title")),
            format!("Message: {}", localized(&result, "contents", "No Content")),
            format!("URL: {}", text(&result, "url")),
            format!("Created: {}", text(&result, "created_at")),
            format!("Sent: {}", text(&result, "sent_at")),
            format!("Completed: {}", text(&result, "completed_at")),
            format!("Successful: {}", text(&result, "successful")),
            format!("Failed: {}", text(&result, "failed")),
            format!("Remaining: {}", text(&result, "remaining")),
            format!("Platform Delivery Stats: {}", text(&result, "platform_delivery_stats")),
        ]
        .join("\n");
        Ok(ToolResult::success_json(output, result))
    }
}

/// Cancels a scheduled notification.
pub struct CancelMessageTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl CancelMessageTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "cancel_message",
            "Cancel Message",
            "Cancel a scheduled message that hasn't been delivered yet.",
        )
        .with_parameters_schema(message_id_schema("The ID of the message to cancel"))
        .with_risk_level(RiskLevel::High);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for CancelMessageTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: MessageIdParams = parse_params(params)?;
        let message_id = path_segment("message_id", &params.message_id)?;
        let request = ApiRequest::delete(format!("notifications/{}", message_id))
            .use_org_credential(false);
        self.client
            .call(request)
            .await
            .map_err(|e| ToolError::api("Error canceling message", e))?;

        Ok(ToolResult::success("Message canceled successfully."))
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
