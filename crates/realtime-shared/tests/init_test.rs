//! Global subscriber installation. Kept in its own test binary because the
//! global default can be set only once per process.

use realtime_shared::{init_tracing, LoggerError, LoggingConfig};

#[test]
fn init_falls_back_on_bad_level_then_rejects_second_install() {
    let bad_level = LoggingConfig {
        level: "not a [valid filter".to_string(),
        json: false,
    };
    assert!(init_tracing(&bad_level).is_ok());
    tracing::info!("subscriber installed");

    let again = init_tracing(&LoggingConfig::default());
    assert!(matches!(again, Err(LoggerError::Init(_))));
    let err = again.unwrap_err();
    assert!(err.to_string().starts_with("failed to initialise tracing:"));
}
