//! Typed environment-variable parsing.
//!
//! Values are read with [`getenv`] (or [`getenv_with`] for an explicit
//! lookup source) and converted through the [`FromEnv`] trait. An unset
//! variable and a variable set to the empty string are treated the same.
//!
//! Resolution order:
//!
//! 1. the variable's value, if non-empty;
//! 2. otherwise [`EnvError::Missing`] when `required` is set;
//! 3. otherwise the `default`, if one was given;
//! 4. otherwise the empty string.
//!
//! The resolved text is then parsed, so an optional numeric variable with no
//! default still fails with [`EnvError::Invalid`] when it is unset.

use thiserror::Error;

/// Errors produced while reading an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// A required variable is unset or empty.
    #[error("environment variable {key} is required")]
    Missing { key: String },

    /// The variable's value could not be parsed into the requested type.
    #[error("environment variable {key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Conversion from the textual value of an environment variable.
pub trait FromEnv: Sized {
    /// Parses `value`, returning a human-readable reason on failure.
    fn from_env(value: &str) -> Result<Self, String>;
}

impl FromEnv for String {
    fn from_env(value: &str) -> Result<Self, String> {
        Ok(value.to_string())
    }
}

impl FromEnv for bool {
    fn from_env(value: &str) -> Result<Self, String> {
        match value {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(format!("invalid boolean value: {other}")),
        }
    }
}

macro_rules! from_env_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnv for $ty {
                fn from_env(value: &str) -> Result<Self, String> {
                    value.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

from_env_via_from_str!(i32, i64, isize, u32, u64, usize, f32, f64);

/// Reads `key` from the process environment and parses it as `T`.
///
/// # Errors
///
/// Returns [`EnvError::Missing`] when `required` is set and the variable is
/// unset or empty, and [`EnvError::Invalid`] when parsing fails.
pub fn getenv<T: FromEnv>(key: &str, required: bool, default: Option<&str>) -> Result<T, EnvError> {
    getenv_with(|k| std::env::var(k).ok(), key, required, default)
}

/// Like [`getenv`], but panics on error.
///
/// Intended for program start-up, where a missing setting is fatal.
///
/// # Panics
///
/// Panics with the [`EnvError`] message if the variable cannot be resolved.
pub fn must_getenv<T: FromEnv>(key: &str, required: bool, default: Option<&str>) -> T {
    match getenv(key, required, default) {
        Ok(value) => value,
        Err(e) => panic!("failed to get env: {e}"),
    }
}

/// Resolves `key` through `lookup` instead of the process environment.
///
/// # Errors
///
/// Same as [`getenv`].
pub fn getenv_with<T, F>(
    lookup: F,
    key: &str,
    required: bool,
    default: Option<&str>,
) -> Result<T, EnvError>
where
    T: FromEnv,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).filter(|value| !value.is_empty());
    let value = match raw {
        Some(value) => value,
        None if required => {
            return Err(EnvError::Missing {
                key: key.to_string(),
            })
        }
        None => default.unwrap_or_default().to_string(),
    };

    T::from_env(&value).map_err(|reason| EnvError::Invalid {
        key: key.to_string(),
        value,
        reason,
    })
}

/// Resolves an optional variable, returning `None` when it is unset or empty.
///
/// # Errors
///
/// Returns [`EnvError::Invalid`] when a present value fails to parse.
pub fn getenv_opt_with<T, F>(lookup: F, key: &str) -> Result<Option<T>, EnvError>
where
    T: FromEnv,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|value| !value.is_empty()) {
        Some(value) => T::from_env(&value)
            .map(Some)
            .map_err(|reason| EnvError::Invalid {
                key: key.to_string(),
                value,
                reason,
            }),
        None => Ok(None),
    }
}
