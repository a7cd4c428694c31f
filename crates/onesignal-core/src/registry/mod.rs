//! Registries for apps, tools and resources.

mod app;
mod base;
mod resource;
mod tool;

pub use app::{AppRegistry, UpdatedField};
pub use base::{BaseRegistry, Registerable};
pub use resource::ResourceRegistry;
pub use tool::ToolRegistry;
