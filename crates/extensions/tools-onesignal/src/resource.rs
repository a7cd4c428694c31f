//! The `onesignal://config` resource.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::OneSignalClient;
use onesignal_protocols::{Resource, ResourceDefinition, ToolError};

pub const CONFIG_URI: &str = "onesignal://config";

const CAPABILITIES: &[&str] = &[
    "Multi-app management (list, add, update, remove, switch)",
    "Push, email and SMS notifications",
    "Message history and cancellation",
    "Device (player) lookup",
    "Segment management",
    "Template management",
    "Organization-level app and API key management",
];

/// Text summary of the running server: version, endpoint, credentials and
/// registered apps. Secrets are reported only as configured or not.
pub struct ConfigResource {
    definition: ResourceDefinition,
    client: Arc<OneSignalClient>,
}

impl ConfigResource {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let definition = ResourceDefinition::text(
            CONFIG_URI,
            "OneSignal Configuration",
            "Server version, API URL, organization key status and registered apps",
        );
        Self { definition, client }
    }

    fn render(&self) -> String {
        let apps = self.client.apps();
        let registered = apps.list();
        let app_lines = if registered.is_empty() {
            "No apps configured".to_string()
        } else {
            registered
                .iter()
                .map(|app| format!("- {}: {}", app.key, app))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let current = apps
            .current()
            .map(|app| app.to_string())
            .unwrap_or_else(|| "None".to_string());
        let org_key = if self.client.has_org_api_key() {
            "Configured"
        } else {
            "Not configured"
        };
        let capabilities = CAPABILITIES
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "OneSignal Server Configuration:\n\
             Version: {}\n\
             API URL: {}\n\
             Organization API Key Status: {}\n\n\
             Available Apps:\n{}\n\n\
             Current App: {}\n\n\
             This MCP server provides tools for:\n{}",
            env!("CARGO_PKG_VERSION"),
            self.client.config().base_url,
            org_key,
            app_lines,
            current,
            capabilities
        )
    }
}

#[async_trait]
impl Resource for ConfigResource {
    fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    async fn read(&self) -> Result<String, ToolError> {
        Ok(self.render())
    }
}
