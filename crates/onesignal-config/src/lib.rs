//! # OneSignal Config
//!
//! Loads the server settings once at startup: an optional TOML file, then
//! the environment (with an optional dotenv file behind it), then validation. The result hands a list of
//! [`AppConfig`](onesignal_protocols::AppConfig) values to the app registry.

mod env;
mod error;
mod loader;
mod schema;
mod validator;

pub use env::{
    API_URL_VAR, DOTENV_FILE, ENV_APP_SOURCES, EnvAppSource, EnvLoader, ORG_API_KEY_VAR, read_dotenv,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
