//! Error types for the realtime client.

use realtime_shared::EnvError;
use thiserror::Error;

/// Errors that can occur while configuring a client or exchanging SDP.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// A required setting is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An environment variable could not be resolved.
    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    /// Client construction failed.
    #[error("failed to create client: {0}")]
    ClientInit(#[source] Box<RealtimeError>),

    /// The local SDP offer is unusable.
    #[error("invalid SDP offer: {0}")]
    InvalidOffer(String),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("realtime HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with something other than `201 Created`.
    #[error("realtime endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The session request could not be encoded.
    #[error("realtime serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The endpoint accepted the call but sent no SDP answer.
    #[error("realtime endpoint returned an empty SDP answer")]
    EmptyAnswer,
}
