//! Configuration loading from file and environment variables.

use crate::client::DEFAULT_BASE_URL;
use crate::session::SessionSettings;
use realtime_shared::{getenv_opt_with, EnvError, LoggingConfig};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Credentials and endpoint of the realtime API.
    #[serde(default)]
    pub openai: OpenaiConfig,

    /// Session request settings.
    #[serde(default)]
    pub session: SessionSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credentials and endpoint of the realtime API.
///
/// `api_key`, `org_id` and `project_id` may be left empty here; they are
/// validated when a client is built.
#[derive(Clone, Deserialize)]
pub struct OpenaiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for OpenaiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            org_id: String::new(),
            project_id: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl fmt::Debug for OpenaiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenaiConfig")
            .field("api_key", &"[REDACTED]")
            .field("org_id", &self.org_id)
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenaiConfig {
    pub fn new(
        api_key: impl Into<String>,
        org_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            org_id: org_id.into(),
            project_id: project_id.into(),
            base_url: default_base_url(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override is malformed.
    #[error("invalid environment override: {0}")]
    Env(#[from] EnvError),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `OPENAI_API_KEY` overrides `openai.api_key`
/// - `OPENAI_ORG_ID` overrides `openai.org_id`
/// - `OPENAI_PROJECT_ID` overrides `openai.project_id`
/// - `OPENAI_BASE_URL` overrides `openai.base_url`
/// - `REALTIME_MODEL` overrides `session.model`
/// - `REALTIME_VOICE` overrides `session.voice`
/// - `REALTIME_LOG_LEVEL` overrides `logging.level`
/// - `REALTIME_LOG_JSON` overrides `logging.json` (`true|1|yes|on` or `false|0|no|off`)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed, or
/// if an override has a malformed value.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Applies the overrides documented on [`load_config`], resolving each
/// variable through `lookup`. Unset or empty variables leave the field as is.
///
/// # Errors
///
/// Returns [`EnvError::Invalid`] if `REALTIME_LOG_JSON` is not a boolean.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let string_overrides: [(&str, &mut String); 7] = [
        ("OPENAI_API_KEY", &mut config.openai.api_key),
        ("OPENAI_ORG_ID", &mut config.openai.org_id),
        ("OPENAI_PROJECT_ID", &mut config.openai.project_id),
        ("OPENAI_BASE_URL", &mut config.openai.base_url),
        ("REALTIME_MODEL", &mut config.session.model),
        ("REALTIME_VOICE", &mut config.session.voice),
        ("REALTIME_LOG_LEVEL", &mut config.logging.level),
    ];
    for (key, field) in string_overrides {
        if let Some(value) = getenv_opt_with::<String, _>(&lookup, key)? {
            *field = value;
        }
    }

    if let Some(json) = getenv_opt_with::<bool, _>(&lookup, "REALTIME_LOG_JSON")? {
        config.logging.json = json;
    }

    Ok(())
}
