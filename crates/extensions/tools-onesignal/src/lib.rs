//! OneSignal tools for the MCP server.
//!
//! Every tool is a thin adapter: parse arguments, build an
//! [`ApiRequest`](onesignal_client::ApiRequest), hand it to the shared
//! [`OneSignalClient`](onesignal_client::OneSignalClient) and render the
//! response as text.

mod extension;
mod format;
mod resource;
mod tools;

pub use extension::OneSignalToolsExtension;
pub use resource::ConfigResource;
pub use tools::*;
