//! `openai-realtime`: starts a realtime voice call from an SDP offer.
//!
//! Usage: `openai-realtime [--config <PATH>] [OFFER_SDP_FILE]`
//!
//! The config file is taken from `--config`, then `REALTIME_CONFIG_PATH`,
//! then `config.toml` in the working directory.
//!
//! The offer is read from the given file, or from stdin when the argument is
//! absent or `-`. The offer must already contain the gathered ICE
//! candidates. The SDP answer is printed to stdout for the peer connection to
//! apply as its remote description.

use realtime_openai::{load_config, RealtimeService, SessionCreateRequest, EVENTS_CHANNEL_LABEL};
use realtime_shared::{init_tracing, Logger};
use tokio::io::AsyncReadExt;

/// Command-line arguments.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config_path: Option<String>,
    offer_path: Option<String>,
}

/// Parses `[--config <PATH>] [OFFER_SDP_FILE]`, program name excluded.
///
/// `--config=<PATH>` is accepted too. Extra positional arguments are ignored.
fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            parsed.config_path = args.next();
        } else if let Some(path) = arg.strip_prefix("--config=") {
            parsed.config_path = Some(path.to_string());
        } else if parsed.offer_path.is_none() {
            parsed.offer_path = Some(arg);
        }
    }
    parsed
}

fn resolve_config_path(
    cli_path: Option<&str>,
    env_path: Option<String>,
) -> (Option<String>, &'static str) {
    if let Some(path) = cli_path.filter(|value| !value.trim().is_empty()) {
        return (Some(path.to_string()), "cli-arg");
    }

    if let Some(path) = env_path {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

async fn read_offer(arg: Option<String>) -> std::io::Result<String> {
    match arg.filter(|a| a != "-") {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut offer = String::new();
            tokio::io::stdin().read_to_string(&mut offer).await?;
            Ok(offer)
        }
    }
}

#[tokio::main]
async fn main() {
    let args = parse_args(std::env::args().skip(1));
    let (resolved_config_path, config_source) = resolve_config_path(
        args.config_path.as_deref(),
        std::env::var("REALTIME_CONFIG_PATH").ok(),
    );
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = load_config(selected_config_path)
        .expect("failed to load configuration, the example cannot start without valid config");

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("{e}");
    }

    let logger = Logger::new([("package", "realtime"), ("example", "openai")]);
    logger.info_fields(
        "resolved startup configuration path",
        [
            ("source", config_source),
            ("path", selected_config_path.unwrap_or("<none>")),
        ],
    );

    let service = RealtimeService::new(logger.clone(), config.openai.clone());
    let client = match service.new_client() {
        Ok(client) => client,
        Err(e) => logger.fatal(&e.to_string()),
    };

    let request = SessionCreateRequest::from_settings(&config.session);
    let session_json = match request.to_json_pretty() {
        Ok(json) => json,
        Err(e) => logger.fatal(&format!("failed to marshal request: {e}")),
    };
    println!("Session Config\n------------\n{session_json}");

    let offer = match read_offer(args.offer_path).await {
        Ok(offer) => offer,
        Err(e) => logger.fatal(&format!("failed to read SDP offer: {e}")),
    };

    logger.info_fields(
        "creating realtime call",
        [
            ("url", client.calls_url()),
            ("events_channel", EVENTS_CHANNEL_LABEL.to_string()),
        ],
    );

    match client.create_call(&offer, &request).await {
        Ok(answer) => println!("Received SDP answer:\n{answer}"),
        Err(e) => {
            logger.error(&e, "failed to create realtime call");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> CliArgs {
        parse_args(raw.iter().map(|a| a.to_string()))
    }

    #[test]
    fn offer_only() {
        assert_eq!(
            args(&["offer.sdp"]),
            CliArgs {
                config_path: None,
                offer_path: Some("offer.sdp".to_string()),
            }
        );
    }

    #[test]
    fn config_flag_before_offer() {
        let parsed = args(&["--config", "realtime.toml", "offer.sdp"]);
        assert_eq!(parsed.config_path.as_deref(), Some("realtime.toml"));
        assert_eq!(parsed.offer_path.as_deref(), Some("offer.sdp"));
    }

    #[test]
    fn config_flag_with_equals_after_offer() {
        let parsed = args(&["-", "--config=realtime.toml"]);
        assert_eq!(parsed.config_path.as_deref(), Some("realtime.toml"));
        assert_eq!(parsed.offer_path.as_deref(), Some("-"));
    }

    #[test]
    fn no_arguments() {
        assert_eq!(args(&[]), CliArgs::default());
    }

    #[test]
    fn cli_path_wins_over_env() {
        let (path, source) =
            resolve_config_path(Some("cli.toml"), Some("env.toml".to_string()));
        assert_eq!(path.as_deref(), Some("cli.toml"));
        assert_eq!(source, "cli-arg");
    }

    #[test]
    fn env_path_used_without_cli() {
        let (path, source) = resolve_config_path(None, Some("env.toml".to_string()));
        assert_eq!(path.as_deref(), Some("env.toml"));
        assert_eq!(source, "env-var");
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let (path, source) = resolve_config_path(Some("  "), Some(String::new()));
        assert_eq!(path, None);
        assert_eq!(source, "default");
    }
}
