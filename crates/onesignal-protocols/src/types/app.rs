//! Registered application credentials.

use std::fmt;

/// One OneSignal application the server can act on behalf of.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Caller-chosen registry key, unique per process.
    pub key: String,

    /// OneSignal App ID.
    pub app_id: String,

    /// App REST API key. Never logged or displayed.
    pub api_key: String,

    /// Display name, defaults to the key.
    pub display_name: String,
}

impl AppConfig {
    pub fn new(
        key: impl Into<String>,
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        let key = key.into();
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| key.clone());
        Self {
            key,
            app_id: app_id.into(),
            api_key: api_key.into(),
            display_name,
        }
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.app_id)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("key", &self.key)
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}
