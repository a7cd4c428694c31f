//! Extension protocol definitions.
//!
//! An extension bundles related tools and resources and registers them
//! with the server at startup.

mod context;
mod manifest;
mod traits;

pub use context::*;
pub use manifest::*;
pub use traits::*;
