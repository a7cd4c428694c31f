//! Extension trait definition.

use async_trait::async_trait;
use std::sync::Arc;

use super::{ExtensionContext, ExtensionManifest};
use crate::error::ExtensionError;

/// Core trait for all extensions.
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    /// Returns the extension manifest.
    fn manifest(&self) -> &ExtensionManifest;

    /// Initialize the extension with the given context.
    async fn initialize(&mut self, ctx: ExtensionContext) -> Result<(), ExtensionError>;
}

/// Trait for accessing the tool registry from extensions.
pub trait ToolRegistryAccess: Send + Sync {
    /// Register a tool.
    fn register_tool(&self, tool: Arc<dyn crate::tool::Tool>) -> Result<(), ExtensionError>;

    /// Unregister a tool.
    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError>;
}

/// Trait for accessing the resource registry from extensions.
pub trait ResourceRegistryAccess: Send + Sync {
    /// Register a resource.
    fn register_resource(
        &self,
        resource: Arc<dyn crate::resource::Resource>,
    ) -> Result<(), ExtensionError>;
}
