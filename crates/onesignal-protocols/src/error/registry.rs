//! App registry errors.

use thiserror::Error;

/// Failures of app registry mutations.
///
/// A failed mutation never leaves the registry partially changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("App key '{0}' already exists. Use a different key or update_app to modify it.")]
    DuplicateKey(String),

    #[error("App key '{0}' not found.")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
