//! Error types for the OneSignal protocol layer.

mod api;
mod extension;
mod registry;
mod tool;

pub use api::*;
pub use extension::*;
pub use registry::*;
pub use tool::*;
