//! Structured logging.
//!
//! [`init_tracing`] installs the global `tracing` subscriber from a
//! [`LoggingConfig`]. [`Logger`] is a cheap, cloneable handle that attaches
//! a constant set of key/value fields to every record it emits, so that all
//! output of one component (an example binary, a client) can be correlated.
//!
//! ```rust,ignore
//! use realtime_shared::Logger;
//!
//! let logger = Logger::new([("package", "realtime"), ("example", "openai")]);
//! logger.info("session created");
//! logger.info_fields("answer received", [("bytes", answer.len().to_string())]);
//! ```

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "realtime_openai=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A global subscriber was already installed, or installation failed.
    #[error("failed to initialise tracing: {0}")]
    Init(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Installs the global `tracing` subscriber.
///
/// An unparsable `level` falls back to `info`.
///
/// # Errors
///
/// Returns [`LoggerError::Init`] if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(LoggerError::Init)
}

/// Ordered key/value pairs attached to log records.
///
/// Rendered as `key=value` pairs separated by single spaces. A value
/// containing whitespace, `=` or `"` is written quoted and escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns a new list holding `self` followed by `other`.
    pub fn merged(&self, other: &Fields) -> Fields {
        let mut pairs = Vec::with_capacity(self.0.len() + other.0.len());
        pairs.extend(self.0.iter().cloned());
        pairs.extend(other.0.iter().cloned());
        Fields(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || c == '=' || c == '"')
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if needs_quoting(value) {
                write!(f, "{key}={value:?}")?;
            } else {
                write!(f, "{key}={value}")?;
            }
        }
        Ok(())
    }
}

/// Logging handle carrying constant fields.
///
/// Every record carries the handle's fields as a single structured `fields`
/// value. Methods suffixed `_fields` append per-call pairs after the
/// constant ones.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    fields: Arc<Fields>,
}

impl Logger {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: Arc::new(Fields::new(fields)),
        }
    }

    /// Returns a child logger whose constant fields are `self`'s followed by
    /// `extra`.
    pub fn with_fields<I, K, V>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: Arc::new(self.fields.merged(&Fields::new(extra))),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn trace(&self, msg: &str) {
        tracing::trace!(fields = %self.fields, "{}", msg);
    }

    pub fn debug(&self, msg: &str) {
        tracing::debug!(fields = %self.fields, "{}", msg);
    }

    pub fn debug_fields<I, K, V>(&self, msg: &str, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = self.fields.merged(&Fields::new(extra));
        tracing::debug!(fields = %fields, "{}", msg);
    }

    pub fn info(&self, msg: &str) {
        tracing::info!(fields = %self.fields, "{}", msg);
    }

    pub fn info_fields<I, K, V>(&self, msg: &str, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = self.fields.merged(&Fields::new(extra));
        tracing::info!(fields = %fields, "{}", msg);
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!(fields = %self.fields, "{}", msg);
    }

    pub fn warn_fields<I, K, V>(&self, msg: &str, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = self.fields.merged(&Fields::new(extra));
        tracing::warn!(fields = %fields, "{}", msg);
    }

    /// Logs `err` at error level.
    ///
    /// With an empty `msg` the error's own text becomes the message and no
    /// separate `error` value is recorded.
    pub fn error(&self, err: &dyn std::error::Error, msg: &str) {
        if msg.is_empty() {
            tracing::error!(fields = %self.fields, "{}", err);
        } else {
            tracing::error!(fields = %self.fields, error = %err, "{}", msg);
        }
    }

    pub fn error_fields<I, K, V>(&self, err: &dyn std::error::Error, msg: &str, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = self.fields.merged(&Fields::new(extra));
        if msg.is_empty() {
            tracing::error!(fields = %fields, "{}", err);
        } else {
            tracing::error!(fields = %fields, error = %err, "{}", msg);
        }
    }

    /// Logs `msg` at error level and panics with it.
    pub fn panic(&self, msg: &str) -> ! {
        tracing::error!(fields = %self.fields, "{}", msg);
        panic!("{msg}");
    }

    /// Logs `msg` at error level and terminates the process with status 1.
    pub fn fatal(&self, msg: &str) -> ! {
        tracing::error!(fields = %self.fields, "{}", msg);
        std::process::exit(1);
    }
}
