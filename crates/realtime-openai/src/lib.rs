//! Realtime voice sessions over WebRTC.
//!
//! Covers the parts of a realtime voice session that live outside the
//! peer connection itself: configuration, the session-create request, the
//! SDP offer/answer exchange with the calls endpoint, and conversion of raw
//! PCM frames between audio buffers and RTP payloads.
//!
//! The peer connection (ICE, DTLS, RTP) and the audio device layer are
//! supplied by the caller; this crate only consumes and produces the SDP
//! text and sample buffers they exchange.
//!
//! # Flow
//!
//! 1. Load a [`Config`] with [`load_config`].
//! 2. Build a [`RealtimeService`] and obtain a [`RealtimeClient`].
//! 3. Create the local offer on the peer connection, wait for ICE gathering,
//!    and pass the SDP to [`RealtimeClient::create_call`] together with a
//!    [`SessionCreateRequest`].
//! 4. Apply the returned answer as the remote description.

pub mod client;
pub mod config;
pub mod error;
pub mod pcm;
pub mod session;

pub use client::{RealtimeClient, RealtimeService, DEFAULT_BASE_URL};
pub use config::{apply_env_overrides, load_config, Config, ConfigError, OpenaiConfig};
pub use error::RealtimeError;
pub use session::{
    AudioConfig, AudioFormat, AudioInput, AudioOutput, Eagerness, MaxOutputTokens,
    NoiseReduction, NoiseReductionKind, SessionCreateRequest, SessionKind, SessionSettings,
    Transcription, TurnDetection, DEFAULT_MODEL, EVENTS_CHANNEL_LABEL,
};
