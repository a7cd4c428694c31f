//! Tool protocol definitions.
//!
//! Tools are the operations an MCP client can invoke.

mod context;
mod definition;
mod result;
mod traits;

pub use context::*;
pub use definition::*;
pub use result::*;
pub use traits::*;
