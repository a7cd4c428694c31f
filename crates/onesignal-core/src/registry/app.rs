//! App registry.
//!
//! Holds the OneSignal apps the server may act for, in insertion order, and
//! which of them is current. Every operation takes the lock once, so each
//! call is atomic with respect to the others. No lock is ever held across an
//! `.await`.

use std::fmt;

use onesignal_protocols::{AppConfig, RegistryError};
use parking_lot::RwLock;
use tracing::{debug, info};

/// A field changed by [`AppRegistry::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatedField {
    AppId,
    ApiKey,
    Name,
}

impl fmt::Display for UpdatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AppId => "App ID",
            Self::ApiKey => "API Key",
            Self::Name => "Name",
        };
        f.write_str(label)
    }
}

#[derive(Default)]
struct State {
    apps: Vec<AppConfig>,
    current: Option<String>,
}

impl State {
    fn position(&self, key: &str) -> Option<usize> {
        self.apps.iter().position(|app| app.key == key)
    }

    fn get(&self, key: &str) -> Option<&AppConfig> {
        self.apps.iter().find(|app| app.key == key)
    }
}

/// Registered apps plus the current selection.
///
/// Invariants: keys are unique, and `current` (when set) names a registered
/// key.
#[derive(Default)]
pub struct AppRegistry {
    state: RwLock<State>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from startup configuration. The first entry becomes
    /// current.
    pub fn from_configs(apps: Vec<AppConfig>) -> Result<Self, RegistryError> {
        let registry = Self::new();
        for app in apps {
            registry.insert(app)?;
        }
        Ok(registry)
    }

    /// Register a new app.
    ///
    /// The name defaults to the key. If no app is current the new one
    /// becomes current.
    pub fn register(
        &self,
        key: &str,
        app_id: &str,
        api_key: &str,
        name: Option<&str>,
    ) -> Result<AppConfig, RegistryError> {
        let app = AppConfig::new(key, app_id, api_key, name.map(str::to_string));
        self.insert(app.clone())?;
        Ok(app)
    }

    fn insert(&self, app: AppConfig) -> Result<(), RegistryError> {
        for (field, value) in [("key", &app.key), ("app_id", &app.app_id), ("api_key", &app.api_key)] {
            if value.is_empty() {
                return Err(RegistryError::InvalidInput(format!("{} must not be empty", field)));
            }
        }

        let mut state = self.state.write();
        if state.position(&app.key).is_some() {
            return Err(RegistryError::DuplicateKey(app.key));
        }

        info!(key = %app.key, app_id = %app.app_id, "App registered");
        if state.current.is_none() {
            debug!(key = %app.key, "App became current");
            state.current = Some(app.key.clone());
        }
        state.apps.push(app);
        Ok(())
    }

    /// Overwrite the provided fields of an existing app.
    ///
    /// Empty strings count as not provided. Returns the fields that were
    /// written, in a fixed order.
    pub fn update(
        &self,
        key: &str,
        app_id: Option<&str>,
        api_key: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<UpdatedField>, RegistryError> {
        let mut state = self.state.write();
        let index = state
            .position(key)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))?;
        let app = &mut state.apps[index];

        let mut updated = Vec::new();
        if let Some(app_id) = app_id.filter(|v| !v.is_empty()) {
            app.app_id = app_id.to_string();
            updated.push(UpdatedField::AppId);
        }
        if let Some(api_key) = api_key.filter(|v| !v.is_empty()) {
            app.api_key = api_key.to_string();
            updated.push(UpdatedField::ApiKey);
        }
        if let Some(name) = name.filter(|v| !v.is_empty()) {
            app.display_name = name.to_string();
            updated.push(UpdatedField::Name);
        }

        if !updated.is_empty() {
            info!(key, fields = ?updated, "App updated");
        }
        Ok(updated)
    }

    /// Remove an app.
    ///
    /// Removing the current app makes the first remaining app current, or
    /// clears the selection when none remain.
    pub fn remove(&self, key: &str) -> Result<AppConfig, RegistryError> {
        let mut state = self.state.write();
        let index = state
            .position(key)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))?;
        let removed = state.apps.remove(index);

        if state.current.as_deref() == Some(key) {
            state.current = state.apps.first().map(|app| app.key.clone());
            debug!(current = ?state.current, "Current app reassigned");
        }
        info!(key, "App removed");
        Ok(removed)
    }

    /// Make `key` current. Returns false, leaving the selection unchanged,
    /// if it is not registered.
    pub fn set_current(&self, key: &str) -> bool {
        let mut state = self.state.write();
        if state.position(key).is_none() {
            return false;
        }
        state.current = Some(key.to_string());
        info!(key, "Switched current app");
        true
    }

    pub fn current(&self) -> Option<AppConfig> {
        let state = self.state.read();
        state
            .current
            .as_deref()
            .and_then(|key| state.get(key))
            .cloned()
    }

    pub fn current_key(&self) -> Option<String> {
        self.state.read().current.clone()
    }

    pub fn get(&self, key: &str) -> Option<AppConfig> {
        self.state.read().get(key).cloned()
    }

    /// Apps in insertion order.
    pub fn list(&self) -> Vec<AppConfig> {
        self.state.read().apps.clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.read().apps.iter().map(|app| app.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().apps.is_empty()
    }

    /// The app a call should use: `app_key` if it names a registered app,
    /// otherwise the current app.
    pub fn resolve(&self, app_key: Option<&str>) -> Option<AppConfig> {
        let state = self.state.read();
        app_key
            .and_then(|key| state.get(key))
            .or_else(|| state.current.as_deref().and_then(|key| state.get(key)))
            .cloned()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
