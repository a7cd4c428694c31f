//! Tool execution errors.

use thiserror::Error;

use super::{ApiError, RegistryError};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Parameter validation failed: {0}")]
    ValidationFailed(String),

    #[error("Error: {0}")]
    Registry(#[from] RegistryError),

    /// A provider call failed; `context` says what the tool was doing.
    #[error("{context}: {source}")]
    Api { context: String, source: ApiError },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl ToolError {
    /// Wrap a provider failure with what the tool was attempting.
    pub fn api(context: impl Into<String>, source: ApiError) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_invalid_parameters() {
        let err = ToolError::InvalidParameters("missing field `title`".to_string());
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[test]
    fn test_tool_error_from_registry() {
        let err: ToolError = RegistryError::NotFound("ghost".to_string()).into();
        assert_eq!(err.to_string(), "Error: App key 'ghost' not found.");
    }

    #[test]
    fn test_tool_error_api_context() {
        let err = ToolError::api(
            "Error retrieving messages",
            ApiError::Provider {
                status: 400,
                message: "bad thing".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Error retrieving messages: bad thing");
    }

    #[test]
    fn test_tool_error_api_keeps_source() {
        use std::error::Error as _;
        let err = ToolError::api("Error canceling message", ApiError::MissingAppContext);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_tool_error_permission_denied() {
        let err = ToolError::PermissionDenied("organization key rejected".to_string());
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_tool_error_debug() {
        let err = ToolError::ValidationFailed("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ValidationFailed"));
    }
}
