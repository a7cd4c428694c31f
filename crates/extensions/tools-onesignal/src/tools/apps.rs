//! App registry management tools.
//!
//! These never touch the network; they edit the in-process registry that
//! decides which app key signs subsequent calls.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_core::AppRegistry;
use onesignal_protocols::{RiskLevel, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::Deserialize;
use serde_json::json;

use super::parse_params;

#[derive(Debug, Deserialize)]
struct KeyParams {
    key: String,
}

#[derive(Debug, Deserialize)]
struct AddAppParams {
    key: String,
    app_id: String,
    api_key: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateAppParams {
    key: String,
    app_id: Option<String>,
    api_key: Option<String>,
    name: Option<String>,
}

fn key_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "key": { "type": "string", "description": description }
        },
        "required": ["key"]
    })
}

/// Lists registered apps and marks the current one.
pub struct ListAppsTool {
    definition: ToolDefinition,
    apps: Arc<AppRegistry>,
}

impl ListAppsTool {
    pub fn new(apps: Arc<AppRegistry>) -> Self {
        let definition = ToolDefinition::new(
            "list_apps",
            "List Apps",
            "List all configured OneSignal apps in this server.",
        );
        Self { definition, apps }
    }
}

#[async_trait]
impl Tool for ListAppsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, _params: serde_json::Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let apps = self.apps.list();
        if apps.is_empty() {
            return Ok(ToolResult::success(
                "No apps configured. Use add_app to add a new app configuration.",
            ));
        }

        let current = self.apps.current_key();
        let mut lines = vec!["Configured OneSignal Apps:".to_string()];
        for app in &apps {
            let marker = if current.as_deref() == Some(app.key.as_str()) {
                " (current)"
            } else {
                ""
            };
            lines.push(format!(
                "- {}: {} (App ID: {}){}",
                app.key, app.display_name, app.app_id, marker
            ));
        }
        Ok(ToolResult::success(lines.join("\n")))
    }
}

/// Registers a new app.
pub struct AddAppTool {
    definition: ToolDefinition,
    apps: Arc<AppRegistry>,
}

impl AddAppTool {
    pub fn new(apps: Arc<AppRegistry>) -> Self {
        let definition = ToolDefinition::new(
            "add_app",
            "Add App",
            "Add a new OneSignal app configuration.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "key": { "type": "string", "description": "Unique identifier for this app configuration" },
                "app_id": { "type": "string", "description": "OneSignal App ID" },
                "api_key": { "type": "string", "description": "OneSignal REST API Key" },
                "name": { "type": "string", "description": "Display name for the app (optional)" }
            },
            "required": ["key", "app_id", "api_key"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, apps }
    }
}

#[async_trait]
impl Tool for AddAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: AddAppParams = parse_params(params)?;
        let app = self.apps.register(
            &params.key,
            &params.app_id,
            &params.api_key,
            params.name.as_deref(),
        )?;

        let mut message = format!(
            "Successfully added app '{}' with name '{}'.",
            app.key, app.display_name
        );
        if self.apps.current_key().as_deref() == Some(app.key.as_str()) {
            message.push_str(" It is now the current app.");
        }
        Ok(ToolResult::success(message))
    }
}

/// Edits a registered app in place.
pub struct UpdateAppTool {
    definition: ToolDefinition,
    apps: Arc<AppRegistry>,
}

impl UpdateAppTool {
    pub fn new(apps: Arc<AppRegistry>) -> Self {
        let definition = ToolDefinition::new(
            "update_app",
            "Update App",
            "Update an existing OneSignal app configuration.",
        )
        .with_parameters_schema(json!({
            "type": "object",
            "properties": {
                "key": { "type": "string", "description": "The key of the app configuration to update" },
                "app_id": { "type": "string", "description": "New OneSignal App ID (optional)" },
                "api_key": { "type": "string", "description": "New OneSignal REST API Key (optional)" },
                "name": { "type": "string", "description": "New display name for the app (optional)" }
            },
            "required": ["key"]
        }))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, apps }
    }
}

#[async_trait]
impl Tool for UpdateAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: UpdateAppParams = parse_params(params)?;
        let updated = self.apps.update(
            &params.key,
            params.app_id.as_deref(),
            params.api_key.as_deref(),
            params.name.as_deref(),
        )?;

        if updated.is_empty() {
            return Ok(ToolResult::success(
                "No changes were made. Specify at least one parameter to update.",
            ));
        }
        let fields: Vec<String> = updated.iter().map(ToString::to_string).collect();
        Ok(ToolResult::success(format!(
            "Successfully updated app '{}': {}.",
            params.key,
            fields.join(", ")
        )))
    }
}

/// Removes a registered app.
pub struct RemoveAppTool {
    definition: ToolDefinition,
    apps: Arc<AppRegistry>,
}

impl RemoveAppTool {
    pub fn new(apps: Arc<AppRegistry>) -> Self {
        let definition = ToolDefinition::new(
            "remove_app",
            "Remove App",
            "Remove a OneSignal app configuration.",
        )
        .with_parameters_schema(key_schema("The key of the app configuration to remove"))
        .with_risk_level(RiskLevel::Medium);
        Self { definition, apps }
    }
}

#[async_trait]
impl Tool for RemoveAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: KeyParams = parse_params(params)?;
        let removed = self.apps.remove(&params.key)?;

        let mut message = format!("Successfully removed app '{}'.", removed.key);
        match self.apps.current() {
            Some(current) if current.key != removed.key => {
                message.push_str(&format!(" Current app: '{}'.", current.key))
            }
            None => message.push_str(" No app is current."),
            _ => {}
        }
        Ok(ToolResult::success(message))
    }
}

/// Changes which app signs app-scoped calls.
pub struct SwitchAppTool {
    definition: ToolDefinition,
    apps: Arc<AppRegistry>,
}

impl SwitchAppTool {
    pub fn new(apps: Arc<AppRegistry>) -> Self {
        let definition = ToolDefinition::new(
            "switch_app",
            "Switch App",
            "Switch the current app to use for API requests.",
        )
        .with_parameters_schema(key_schema("The key of the app configuration to use"));
        Self { definition, apps }
    }
}

#[async_trait]
impl Tool for SwitchAppTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value, _ctx: ToolContext) -> Result<ToolResult, ToolError> {
        let params: KeyParams = parse_params(params)?;
        if !self.apps.set_current(&params.key) {
            let keys = self.apps.keys();
            let available = if keys.is_empty() {
                "None".to_string()
            } else {
                keys.join(", ")
            };
            return Err(ToolError::InvalidParameters(format!(
                "App key '{}' not found. Available apps: {}",
                params.key, available
            )));
        }

        let name = self
            .apps
            .get(&params.key)
            .map(|app| app.display_name)
            .unwrap_or_else(|| params.key.clone());
        Ok(ToolResult::success(format!(
            "Switched to app '{}' ({}).",
            params.key, name
        )))
    }
}

#[cfg(test)]
#[path = "apps_tests.rs"]
mod tests;
