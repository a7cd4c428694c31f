//! # OneSignal Protocols
//!
//! Core protocol definitions (traits) shared by the OneSignal MCP crates.
//! Contains only interface definitions and error types - no HTTP or I/O.
//!
//! ## Core Traits
//!
//! - [`Extension`] - Bundles tools and resources and registers them at startup
//! - [`Tool`] - An MCP-callable operation
//! - [`Resource`] - A readable MCP resource addressed by URI
//!
//! [`AppConfig`] is the credential record shared by configuration loading,
//! the app registry and the HTTP client.

pub mod error;
pub mod extension;
pub mod resource;
pub mod tool;
pub mod types;

// Re-export core traits
pub use extension::{Extension, ExtensionContext, ExtensionManifest};
pub use resource::{Resource, ResourceDefinition};
pub use tool::{Tool, ToolContext, ToolDefinition, ToolResult};
pub use error::{ApiError, ExtensionError, RegistryError, ToolError};
pub use types::*;
