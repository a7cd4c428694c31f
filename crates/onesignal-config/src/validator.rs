//! Configuration validation.

use std::collections::HashSet;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_api(config, &mut result);
        Self::validate_apps(config, &mut result);

        result
    }

    fn validate_api(config: &Config, result: &mut ValidationResult) {
        match url::Url::parse(&config.api_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ValidationError::new(
                "api_url",
                format!("Unsupported URL scheme: {}", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                "api_url",
                format!("Invalid URL: {}", e),
            )),
        }

        if config.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if !config.has_org_api_key() {
            result.add_warning(ValidationWarning::new(
                "org_api_key",
                "Organization API Key not configured; app management tools will fail",
            ));
        }
    }

    fn validate_apps(config: &Config, result: &mut ValidationResult) {
        if config.apps.is_empty() {
            result.add_warning(ValidationWarning::new(
                "apps",
                "No app configurations found. Use add_app to add an app configuration.",
            ));
        }

        let mut seen = HashSet::new();
        for (i, app) in config.apps.iter().enumerate() {
            let path = format!("apps[{}]", i);
            if app.key.is_empty() {
                result.add_error(ValidationError::new(format!("{}.key", path), "Key cannot be empty"));
            } else if !seen.insert(app.key.as_str()) {
                result.add_error(ValidationError::new(
                    format!("{}.key", path),
                    format!("Duplicate app key '{}'", app.key),
                ));
            }
            if app.app_id.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.app_id", path),
                    "App ID cannot be empty",
                ));
            }
            if app.api_key.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.api_key", path),
                    "API key cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
