//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use onesignal_protocols::AppConfig;

/// Base URL of the OneSignal REST API.
pub const DEFAULT_API_URL: &str = "https://api.onesignal.com/api/v1";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Organization API key, needed for app management and exports.
    #[serde(default, skip_serializing)]
    pub org_api_key: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub apps: Vec<AppEntry>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            org_api_key: None,
            timeout_seconds: default_timeout_seconds(),
            apps: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// App entries as registry records, in file order.
    pub fn app_configs(&self) -> Vec<AppConfig> {
        self.apps.iter().map(AppEntry::to_app_config).collect()
    }

    /// Whether an organization key is available.
    pub fn has_org_api_key(&self) -> bool {
        self.org_api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Configuration as JSON with every secret masked.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "api_url": self.api_url,
            "org_api_key": self.org_api_key.as_deref().map(mask_secret),
            "timeout_seconds": self.timeout_seconds,
            "apps": self.apps.iter().map(|app| serde_json::json!({
                "key": app.key,
                "app_id": app.app_id,
                "api_key": mask_secret(&app.api_key),
                "name": app.display_name(),
            })).collect::<Vec<_>>(),
            "logging": self.logging,
        })
    }
}

/// One `[[apps]]` table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub key: String,
    pub app_id: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AppEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::new(
            self.key.clone(),
            self.app_id.clone(),
            self.api_key.clone(),
            self.name.clone(),
        )
    }
}

impl fmt::Debug for AppEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppEntry")
            .field("key", &self.key)
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files.
    #[serde(default = "default_true")]
    pub file: bool,

    /// Log directory, defaults to `~/.onesignal-mcp/logs`.
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: true,
            dir: None,
        }
    }
}

/// Keep the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
