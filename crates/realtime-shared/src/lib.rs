//! Shared utilities for the realtime workspace.
//!
//! Provides the pieces every example program needs besides the vendor
//! session logic itself:
//!
//! - [`Set`]: an unordered collection of unique values;
//! - [`env`]: typed environment-variable parsing with defaults and
//!   required-ness;
//! - [`logger`]: tracing initialisation and a [`Logger`] handle that stamps
//!   constant fields onto every record.

pub mod env;
pub mod logger;
pub mod set;

pub use env::{getenv, getenv_opt_with, getenv_with, must_getenv, EnvError, FromEnv};
pub use logger::{init_tracing, Fields, Logger, LoggerError, LoggingConfig};
pub use set::Set;
