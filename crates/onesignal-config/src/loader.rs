//! Configuration loader.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};

use crate::env::{DOTENV_FILE, EnvLoader, read_dotenv};
use crate::error::ConfigError;
use crate::schema::Config;
use crate::validator::ConfigValidator;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        Self::load_with(path, &EnvLoader::from_process())
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        Self::load_str_with(content, &EnvLoader::from_process())
    }

    /// Build the startup configuration: optional file, then the process
    /// environment backed by a dotenv file, then validation.
    ///
    /// Without `env_file`, `.env` in the working directory is used when it
    /// exists. A named `env_file` must exist.
    pub fn resolve(path: Option<&Path>, env_file: Option<&Path>) -> Result<Config, ConfigError> {
        let dotenv = match env_file {
            Some(file) => {
                let expanded = PathBuf::from(Self::expand_path(&file.to_string_lossy()));
                info!("Loading environment from {}", expanded.display());
                read_dotenv(&expanded)?
            }
            None if Path::new(DOTENV_FILE).exists() => read_dotenv(Path::new(DOTENV_FILE))?,
            None => HashMap::new(),
        };
        Self::resolve_with(path, &EnvLoader::from_process().with_fallback(dotenv))
    }

    /// [`resolve`](Self::resolve) against an explicit environment.
    pub fn resolve_with<F>(path: Option<&Path>, env: &EnvLoader<F>) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                let expanded = PathBuf::from(Self::expand_path(&path.to_string_lossy()));
                info!("Loading configuration from {}", expanded.display());
                Self::load_with(&expanded, env)?
            }
            None => Config::default(),
        };

        env.apply(&mut config);

        let result = ConfigValidator::validate(&config);
        for warning in &result.warnings {
            warn!("{}: {}", warning.path, warning.message);
        }
        if !result.is_valid() {
            let message = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ConfigError::Invalid(message));
        }

        Ok(config)
    }

    fn load_with<F>(path: &Path, env: &EnvLoader<F>) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str_with(&content, env)
    }

    fn load_str_with<F>(content: &str, env: &EnvLoader<F>) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = Self::expand_env_vars(content, |name| env.var(name))?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value =
                lookup(var_name).ok_or_else(|| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
