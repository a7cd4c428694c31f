//! Tool execution context.

/// Context for a single tool invocation.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Correlation ID tying the call's log lines together.
    pub correlation_id: String,

    /// JSON-RPC request id that triggered the call, if any.
    pub request_id: Option<String>,
}

impl ToolContext {
    /// Create a new tool context with a fresh correlation id.
    pub fn new() -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            request_id: None,
        }
    }

    /// Attach the originating request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::new()
    }
}
