//! Resource registry.

use std::sync::Arc;

use onesignal_protocols::extension::ResourceRegistryAccess;
use onesignal_protocols::{ExtensionError, Resource, ResourceDefinition};

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn Resource {
    fn registry_id(&self) -> &str {
        &self.definition().uri
    }
}

/// Resources readable through `resources/read`, keyed by URI.
#[derive(Default)]
pub struct ResourceRegistry {
    inner: BaseRegistry<dyn Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, resource: Arc<dyn Resource>) -> Result<(), ExtensionError> {
        self.inner.register(resource)
    }

    pub fn get(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.inner.get(uri)
    }

    pub fn list(&self) -> Vec<ResourceDefinition> {
        self.inner
            .sorted()
            .iter()
            .map(|resource| resource.definition().clone())
            .collect()
    }
}

impl ResourceRegistryAccess for ResourceRegistry {
    fn register_resource(&self, resource: Arc<dyn Resource>) -> Result<(), ExtensionError> {
        self.register(resource)
    }
}
