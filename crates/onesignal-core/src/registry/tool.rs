//! Tool registry.

use std::sync::Arc;

use onesignal_protocols::extension::ToolRegistryAccess;
use onesignal_protocols::{ExtensionError, Tool, ToolDefinition};
use tracing::debug;

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn Tool {
    fn registry_id(&self) -> &str {
        &self.definition().id
    }
}

/// Tools callable through `tools/call`, keyed by tool name.
pub struct ToolRegistry {
    inner: BaseRegistry<dyn Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        let id = tool.definition().id.clone();
        self.inner.register(tool)?;
        debug!(tool = %id, "Tool registered");
        Ok(())
    }

    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.inner.get(id)
    }

    /// Tool definitions ordered by name.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.inner
            .sorted()
            .iter()
            .map(|tool| tool.definition().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistryAccess for ToolRegistry {
    fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), ExtensionError> {
        self.register(tool)
    }

    fn unregister_tool(&self, tool_id: &str) -> Result<(), ExtensionError> {
        self.unregister(tool_id)
    }
}
