//! Organization-level tools, signed with the organization key.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::{ApiRequest, OneSignalClient};
use onesignal_protocols::{RiskLevel, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{current_app, org_error, parse_params, path_segment};
use crate::format::{configured, items, section, text, text_or};

#[derive(Debug, Deserialize)]
struct CreateAppParams {
    name: String,
    site_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateAppParams {
    app_id: String,
    name: Option<String>,
    site_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppIdParams {
    app_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateKeyParams {
    app_id: String,
    name: String,
}

/// Body fields for app create/update, skipping absent and empty values.
fn app_fields(name: Option<String>, site_name: Option<String>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in [("name", name), ("site_name", site_name)] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            fields.insert(key.to_string(), Value::String(value));
        }
    }
    fields
}

fn app_id_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "app_id": { "type": "string", "description": description }
        },
        "required": ["app_id"]
    })
}

pub struct ViewAppDetailsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewAppDetailsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_app_details",
            "View App Details",
            "Get detailed information about the configured OneSignal app.",
        );
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewAppDetailsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        const CONTEXT: &str = "Error retrieving app details";
        let app = current_app(&self.client, CONTEXT)?;
        let request = ApiRequest::get(format!("apps/{}", app.app_id)).use_org_credential(true);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| org_error(CONTEXT, "view app details", e))?;

        let output = [
            format!("ID: {}", text(&result, "id")),
            format!("Name: {}", text(&result, "name")),
            format!("Created: {}", text(&result, "created_at")),
            format!("Updated: {}", text(&result, "updated_at")),
            format!("GCM: {}", configured(&result, "gcm_key")),
            format!("APNS: {}", configured(&result, "apns_env")),
            format!("Chrome: {}", configured(&result, "chrome_web_key")),
            format!("Safari: {}", configured(&result, "safari_site_origin")),
            format!("Email: {}", configured(&result, "email_marketing")),
            format!("SMS: {}", configured(&result, "sms_marketing")),
        ]
        .join("\n");
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct ViewAppsTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewAppsTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_apps",
            "View Apps",
            "List all OneSignal applications for the organization (requires Organization API Key).",
        );
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewAppsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let result = self
            .client
            .call(ApiRequest::get("apps").use_org_credential(true))
            .await
            .map_err(|e| org_error("Error fetching applications", "view all apps", e))?;

        let apps = items(&result, "apps");
        if apps.is_empty() {
            return Ok(ToolResult::success("No applications found."));
        }
        let output = section(
            "Applications",
            apps.iter().map(|app| {
                format!(
                    "ID: {}\nName: {}\nGCM: {}\nAPNS: {}\nCreated: {}",
                    text(app, "id"),
                    text(app, "name"),
                    configured(app, "gcm_key"),
                    configured(app, "apns_env"),
                    text(app, "created_at")
                )
            }),
        );
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct CreateAppTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl CreateAppTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "create_app",
            "Create App",
            "Create a new OneSignal application at the organization level (requires Organization API Key).",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Name of the new application" },
                "site_name": {
                    "type": "string",
                    "description": "Optional name of the website for the application"
                }
            },
            "required": ["name"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for CreateAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: CreateAppParams = parse_params(params)?;
        if params.name.is_empty() {
            return Err(ToolError::InvalidParameters("name must not be empty".to_string()));
        }
        let name = params.name.clone();
        let body = app_fields(Some(params.name), params.site_name);
        let result = self
            .client
            .call(ApiRequest::post("apps").with_body(Value::Object(body)).use_org_credential(true))
            .await
            .map_err(|e| org_error("Error creating application", "create apps", e))?;

        Ok(ToolResult::success_json(
            format!(
                "Application '{}' created successfully with ID: {}",
                name,
                text(&result, "id")
            ),
            result,
        ))
    }
}

/// Renames an app at the provider. Distinct from `update_app`, which only
/// edits the local registry.
pub struct UpdateOneSignalAppTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl UpdateOneSignalAppTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "update_onesignal_app",
            "Update OneSignal App",
            "Update an existing OneSignal application at the organization level (requires Organization API Key).",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "app_id": { "type": "string", "description": "ID of the app to update" },
                "name": { "type": "string", "description": "New name for the application (optional)" },
                "site_name": {
                    "type": "string",
                    "description": "New site name for the application (optional)"
                }
            },
            "required": ["app_id"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for UpdateOneSignalAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: UpdateAppParams = parse_params(params)?;
        let app_id = path_segment("app_id", &params.app_id)?;
        let body = app_fields(params.name, params.site_name);
        if body.is_empty() {
            return Err(ToolError::InvalidParameters(
                "No update parameters provided. Specify at least one parameter to update."
                    .to_string(),
            ));
        }

        let request = ApiRequest::put(format!("apps/{}", app_id))
            .with_body(Value::Object(body))
            .use_org_credential(true);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| org_error("Error updating application", "update apps", e))?;

        Ok(ToolResult::success_json(
            format!("Application '{}' updated successfully", app_id),
            result,
        ))
    }
}

pub struct ViewAppApiKeysTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl ViewAppApiKeysTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "view_app_api_keys",
            "View App API Keys",
            "View API keys for a specific OneSignal app (requires Organization API Key).",
        )
        .with_parameters_schema(app_id_schema("The ID of the app to retrieve API keys for"));
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for ViewAppApiKeysTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: AppIdParams = parse_params(params)?;
        let app_id = path_segment("app_id", &params.app_id)?;
        let request =
            ApiRequest::get(format!("apps/{}/auth/tokens", app_id)).use_org_credential(true);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| org_error("Error fetching API keys", "view API keys", e))?;

        let tokens = items(&result, "tokens");
        if tokens.is_empty() {
            return Ok(ToolResult::success(format!(
                "No API keys found for app ID: {}",
                app_id
            )));
        }
        let output = section(
            &format!("API Keys for App {}", app_id),
            tokens.iter().map(|key| {
                format!(
                    "ID: {}\nName: {}\nCreated: {}\nUpdated: {}\nIP Allowlist Mode: {}",
                    text(key, "id"),
                    text(key, "name"),
                    text(key, "created_at"),
                    text(key, "updated_at"),
                    text_or(key, "ip_allowlist_mode", "disabled")
                )
            }),
        );
        Ok(ToolResult::success_json(output, result))
    }
}

pub struct CreateAppApiKeyTool {
    definition: ToolDefinition,
    client: Arc<OneSignalClient>,
}

impl CreateAppApiKeyTool {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ToolDefinition::new(
            "create_app_api_key",
            "Create App API Key",
            "Create a new API key for a specific OneSignal app (requires Organization API Key).",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "app_id": { "type": "string", "description": "The ID of the app to create an API key for" },
                "name": { "type": "string", "description": "Name for the new API key" }
            },
            "required": ["app_id", "name"]
        }))
        .with_risk_level(RiskLevel::High);
        Self { definition, client }
    }
}

#[async_trait]
impl Tool for CreateAppApiKeyTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: CreateKeyParams = parse_params(params)?;
        let app_id = path_segment("app_id", &params.app_id)?;
        let request = ApiRequest::post(format!("apps/{}/auth/tokens", app_id))
            .with_body(json!({ "name": &params.name }))
            .use_org_credential(true);
        let result = self
            .client
            .call(request)
            .await
            .map_err(|e| org_error("Error creating API key", "create API keys", e))?;

        // The token is only returned once, so it goes into the text.
        Ok(ToolResult::success(format!(
            "API Key '{}' created successfully!\n\nKey ID: {}\nToken: {}\n\n\
             IMPORTANT: Save this token now! You won't be able to see the full token again.",
            params.name,
            text(&result, "id"),
            text(&result, "token")
        )))
    }
}

#[cfg(test)]
#[path = "organization_tests.rs"]
mod tests;
