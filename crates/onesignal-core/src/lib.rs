//! # OneSignal Core
//!
//! Registries shared by every layer of the server.
//!
//! - [`AppRegistry`] - registered OneSignal apps and the current selection
//! - [`ToolRegistry`] - tools exposed over MCP, keyed by tool name
//! - [`ResourceRegistry`] - readable resources, keyed by URI

pub mod registry;

pub use registry::{AppRegistry, ResourceRegistry, ToolRegistry, UpdatedField};
