//! Extension context for initialization.

use std::sync::Arc;

use super::{ResourceRegistryAccess, ToolRegistryAccess};

/// Registries an extension fills during initialization.
#[derive(Clone)]
pub struct ExtensionContext {
    pub tool_registry: Arc<dyn ToolRegistryAccess>,
    pub resource_registry: Arc<dyn ResourceRegistryAccess>,
}

impl ExtensionContext {
    pub fn new(
        tool_registry: Arc<dyn ToolRegistryAccess>,
        resource_registry: Arc<dyn ResourceRegistryAccess>,
    ) -> Self {
        Self {
            tool_registry,
            resource_registry,
        }
    }
}
