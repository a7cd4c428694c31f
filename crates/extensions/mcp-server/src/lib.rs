//! MCP (Model Context Protocol) server for OneSignal.
//!
//! Serves the tool and resource registries to a single client as JSON-RPC
//! 2.0 messages, one per line, over stdin/stdout.

mod protocol;
mod server;
mod transport;

pub use protocol::{McpError, McpRequest, McpResponse, RequestId, error_codes};
pub use server::{McpServer, PROTOCOL_VERSION, ServerInfo};
pub use transport::{TransportError, serve, serve_stdio};
