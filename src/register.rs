//! Builds the registries and the HTTP client from the loaded configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use onesignal_client::{ClientConfig, OneSignalClient};
use onesignal_config::Config;
use onesignal_core::{AppRegistry, ResourceRegistry, ToolRegistry};
use onesignal_protocols::{Extension, ExtensionContext};
use onesignal_tools::OneSignalToolsExtension;

/// Everything the MCP server dispatches to.
pub(crate) struct Registries {
    pub tools: Arc<ToolRegistry>,
    pub resources: Arc<ResourceRegistry>,
}

pub(crate) async fn build_registries(config: &Config) -> Result<Registries, Box<dyn std::error::Error>> {
    let apps = Arc::new(AppRegistry::from_configs(config.app_configs())?);
    if let Some(current) = apps.current() {
        info!(apps = apps.len(), current = %current, "App registry ready");
    } else {
        info!("No apps configured; add one with the add_app tool");
    }

    let client_config = ClientConfig::new(config.api_url.clone())
        .with_org_api_key(config.org_api_key.clone())
        .with_timeout(Duration::from_secs(config.timeout_seconds));
    let client = Arc::new(OneSignalClient::new(client_config, apps)?);

    let tools = Arc::new(ToolRegistry::new());
    let resources = Arc::new(ResourceRegistry::new());
    let mut extension = OneSignalToolsExtension::new(client);
    let ctx = ExtensionContext::new(tools.clone(), resources.clone());
    extension.initialize(ctx).await?;
    info!(
        extension = %extension.manifest().id,
        tools = tools.len(),
        "Extension initialized"
    );

    Ok(Registries { tools, resources })
}
