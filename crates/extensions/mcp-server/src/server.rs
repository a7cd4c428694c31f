//! Request dispatcher for the MCP methods this server supports.

use std::sync::Arc;

use onesignal_core::{ResourceRegistry, ToolRegistry};
use onesignal_protocols::{Tool, ToolContext, ToolResult};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::protocol::{McpError, McpRequest, McpResponse, RequestId};

/// Newest protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

const SUPPORTED_VERSIONS: &[&str] = &[PROTOCOL_VERSION, "2025-03-26", "2024-11-05"];

/// Name and version reported in the `initialize` result.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    #[serde(default)]
    protocol_version: Option<String>,
}

/// Dispatches JSON-RPC requests against the tool and resource registries.
pub struct McpServer {
    info: ServerInfo,
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceRegistry>,
}

impl McpServer {
    pub fn new(info: ServerInfo, tools: Arc<ToolRegistry>, resources: Arc<ResourceRegistry>) -> Self {
        Self {
            info,
            tools,
            resources,
        }
    }

    /// Handle one message. Notifications produce no response.
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, id = ?request.id, "MCP request");

        if request.is_notification() {
            match request.method.as_str() {
                "notifications/initialized" => info!("Client initialized"),
                other => debug!(method = other, "Ignoring notification"),
            }
            return None;
        }

        let id = request.id.clone();
        let params = request.params.unwrap_or(Value::Null);
        let result = match request.method.as_str() {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params, id.as_ref()).await,
            "resources/list" => Ok(self.list_resources()),
            "resources/read" => self.read_resource(params).await,
            other => Err(McpError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => McpResponse::success(id, value),
            Err(error) => {
                warn!(code = error.code, message = %error.message, "MCP request failed");
                McpResponse::error(id, error)
            }
        })
    }

    fn initialize(&self, params: Value) -> Result<Value, McpError> {
        let params: InitializeParams = parse(params)?;
        let version = params
            .protocol_version
            .filter(|v| SUPPORTED_VERSIONS.contains(&v.as_str()))
            .unwrap_or_else(|| PROTOCOL_VERSION.to_string());

        Ok(json!({
            "protocolVersion": version,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version
            }
        }))
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self.tools.list().iter().map(|d| d.to_mcp_tool()).collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value, id: Option<&RequestId>) -> Result<Value, McpError> {
        let params: CallToolParams = parse(params)?;
        let tool = self
            .tools
            .get(&params.name)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = match params.arguments {
            None | Some(Value::Null) => json!({}),
            Some(arguments) => arguments,
        };

        let mut ctx = ToolContext::new();
        if let Some(id) = id {
            ctx = ctx.with_request_id(id.to_string());
        }
        info!(
            tool = %params.name,
            correlation_id = %ctx.correlation_id,
            risk = ?tool.risk_level(),
            "Calling tool"
        );

        Ok(match execute(tool.as_ref(), arguments, ctx).await {
            Ok(result) if result.success => success_content(result),
            Ok(result) => error_content(result.display_text()),
            Err(message) => {
                warn!(tool = %params.name, error = %message, "Tool failed");
                error_content(&message)
            }
        })
    }

    fn list_resources(&self) -> Value {
        json!({ "resources": self.resources.list() })
    }

    async fn read_resource(&self, params: Value) -> Result<Value, McpError> {
        let params: ReadResourceParams = parse(params)?;
        let resource = self
            .resources
            .get(&params.uri)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown resource: {}", params.uri)))?;

        let text = resource
            .read()
            .await
            .map_err(|e| McpError::internal_error(e.to_string()))?;
        Ok(json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": resource.definition().mime_type,
                "text": text
            }]
        }))
    }
}

async fn execute(tool: &dyn Tool, arguments: Value, ctx: ToolContext) -> Result<ToolResult, String> {
    tool.validate(&arguments).map_err(|e| e.to_string())?;
    tool.execute(arguments, ctx).await.map_err(|e| e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, McpError> {
    let params = if params.is_null() { json!({}) } else { params };
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string()))
}

fn success_content(result: ToolResult) -> Value {
    let mut value = json!({
        "content": [{ "type": "text", "text": result.content }],
        "isError": false
    });
    // structuredContent must be an object.
    match result.structured_output {
        Some(output @ Value::Object(_)) => value["structuredContent"] = output,
        Some(Value::Null) | None => {}
        Some(output) => value["structuredContent"] = json!({ "items": output }),
    }
    value
}

fn error_content(message: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": message }],
        "isError": true
    })
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
