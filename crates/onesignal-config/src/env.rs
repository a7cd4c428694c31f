//! Environment bootstrap of app entries and credentials.
//!
//! Precedence for each named app is the order of the variable lists in
//! [`ENV_APP_SOURCES`]: the first variable that is set and non-empty wins.
//! The `mandible` entry falls back to the generic `ONESIGNAL_APP_ID` /
//! `ONESIGNAL_API_KEY` pair, so a single-app deployment only sets those.
//!
//! Values may also come from a dotenv file. The process environment wins
//! over the file.

use std::collections::HashMap;
use std::path::Path;

use onesignal_protocols::AppConfig;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::schema::{AppEntry, Config};

/// Dotenv file read from the working directory when no other is named.
pub const DOTENV_FILE: &str = ".env";

/// Organization API key.
pub const ORG_API_KEY_VAR: &str = "ONESIGNAL_ORG_API_KEY";

/// Base URL override.
pub const API_URL_VAR: &str = "ONESIGNAL_API_URL";

/// A named app whose credentials come from environment variables.
#[derive(Debug, Clone, Copy)]
pub struct EnvAppSource {
    pub key: &'static str,
    pub display_name: &'static str,
    pub app_id_vars: &'static [&'static str],
    pub api_key_vars: &'static [&'static str],
}

/// Environment-provided apps, in registration order.
pub const ENV_APP_SOURCES: &[EnvAppSource] = &[
    EnvAppSource {
        key: "mandible",
        display_name: "Mandible",
        app_id_vars: &["ONESIGNAL_MANDIBLE_APP_ID", "ONESIGNAL_APP_ID"],
        api_key_vars: &["ONESIGNAL_MANDIBLE_API_KEY", "ONESIGNAL_API_KEY"],
    },
    EnvAppSource {
        key: "weirdbrains",
        display_name: "Weird Brains",
        app_id_vars: &["ONESIGNAL_WEIRDBRAINS_APP_ID"],
        api_key_vars: &["ONESIGNAL_WEIRDBRAINS_API_KEY"],
    },
];

fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read the `KEY=value` pairs of a dotenv file without touching the
/// process environment.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let invalid = |e: dotenvy::Error| ConfigError::InvalidFormat(format!("{}: {}", path.display(), e));

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(invalid)? {
        let (key, value) = item.map_err(invalid)?;
        vars.insert(key, value);
    }
    debug!(path = %path.display(), count = vars.len(), "Read dotenv file");
    Ok(vars)
}

/// Reads configuration from environment variables through a lookup function.
pub struct EnvLoader<F> {
    lookup: F,
}

impl EnvLoader<fn(&str) -> Option<String>> {
    /// Loader backed by the process environment.
    pub fn from_process() -> Self {
        Self {
            lookup: process_var,
        }
    }
}

impl<F> EnvLoader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Loader backed by an arbitrary lookup, used by tests.
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }

    /// Consult `vars` for names this loader has no value for.
    pub fn with_fallback(
        self,
        vars: HashMap<String, String>,
    ) -> EnvLoader<impl Fn(&str) -> Option<String>> {
        let lookup = self.lookup;
        EnvLoader {
            lookup: move |name: &str| lookup(name).or_else(|| vars.get(name).cloned()),
        }
    }

    /// Raw value of one variable.
    pub fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    fn first_set(&self, vars: &[&str]) -> Option<String> {
        vars.iter()
            .filter_map(|name| (self.lookup)(*name))
            .find(|value| !value.is_empty())
    }

    /// Apps whose id and key both resolve, in [`ENV_APP_SOURCES`] order.
    pub fn app_configs(&self) -> Vec<AppConfig> {
        ENV_APP_SOURCES
            .iter()
            .filter_map(|source| {
                let app_id = self.first_set(source.app_id_vars)?;
                let api_key = self.first_set(source.api_key_vars)?;
                Some(AppConfig::new(
                    source.key,
                    app_id,
                    api_key,
                    Some(source.display_name.to_string()),
                ))
            })
            .collect()
    }

    pub fn org_api_key(&self) -> Option<String> {
        self.first_set(&[ORG_API_KEY_VAR])
    }

    pub fn api_url(&self) -> Option<String> {
        self.first_set(&[API_URL_VAR])
    }

    /// Merge the environment into `config`.
    ///
    /// Apps already present in the file keep the file's values; new ones are
    /// appended. The org key and URL from the environment replace the file's.
    pub fn apply(&self, config: &mut Config) {
        for app in self.app_configs() {
            if config.apps.iter().any(|entry| entry.key == app.key) {
                debug!(key = %app.key, "App from environment shadowed by config file");
                continue;
            }
            info!(key = %app.key, app_id = %app.app_id, "App configured from environment");
            config.apps.push(AppEntry {
                key: app.key,
                app_id: app.app_id,
                api_key: app.api_key,
                name: Some(app.display_name),
            });
        }

        if let Some(key) = self.org_api_key() {
            config.org_api_key = Some(key);
        }
        if let Some(url) = self.api_url() {
            config.api_url = url;
        }
    }
}
