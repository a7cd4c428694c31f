//! Resource protocol definitions.
//!
//! Resources are read-only documents an MCP client can fetch by URI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Definition of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl ResourceDefinition {
    /// Create a plain-text resource definition.
    pub fn text(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: "text/plain".to_string(),
        }
    }
}

/// A readable resource.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Returns the resource definition.
    fn definition(&self) -> &ResourceDefinition;

    /// Render the current contents.
    async fn read(&self) -> Result<String, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_definition() {
        let def = ResourceDefinition::text("onesignal://config", "Config", "Server configuration");
        assert_eq!(def.mime_type, "text/plain");
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["mimeType"], "text/plain");
        assert_eq!(json["uri"], "onesignal://config");
    }
}
