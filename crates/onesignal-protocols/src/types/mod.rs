//! Common types used across the OneSignal MCP crates.

mod app;
mod common;

pub use app::*;
pub use common::*;
