//! OneSignal tools extension definition.

use std::sync::Arc;

use async_trait::async_trait;
use onesignal_client::OneSignalClient;
use onesignal_protocols::extension::Provides;
use onesignal_protocols::{
    Extension, ExtensionContext, ExtensionError, ExtensionManifest, Resource, Tool, Version,
};
use tracing::info;

use crate::resource::{CONFIG_URI, ConfigResource};
use crate::tools::all_tools;

/// Registers every OneSignal tool and the configuration resource.
pub struct OneSignalToolsExtension {
    manifest: ExtensionManifest,
    client: Arc<OneSignalClient>,
}

impl OneSignalToolsExtension {
    pub fn new(client: Arc<OneSignalClient>) -> Self {
        let mut manifest = ExtensionManifest::new("tools-onesignal", "OneSignal Tools", Version::new(0, 1, 0))
            .with_description("OneSignal app, message, device, segment, template and organization tools");
        manifest.provides = Provides {
            tools: all_tools(Arc::clone(&client))
                .iter()
                .map(|tool| tool.definition().id.clone())
                .collect(),
            resources: vec![CONFIG_URI.to_string()],
        };
        Self { manifest, client }
    }
}

#[async_trait]
impl Extension for OneSignalToolsExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError> {
        let tools: Vec<Arc<dyn Tool>> = all_tools(Arc::clone(&self.client));
        let count = tools.len();
        for tool in tools {
            ctx.tool_registry.register_tool(tool)?;
        }

        let resource: Arc<dyn Resource> = Arc::new(ConfigResource::new(Arc::clone(&self.client)));
        ctx.resource_registry.register_resource(resource)?;

        info!(tools = count, "OneSignal tools registered");
        Ok(())
    }
}
