//! Session-create request schema for the realtime endpoint.
//!
//! The request is sent as the `session` part of the call-creation form and
//! configures the model, the audio formats in both directions, turn
//! detection, and transcription. Unset optional fields are omitted from the
//! JSON entirely.

use crate::error::RealtimeError;
use crate::pcm::SAMPLE_RATE;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label of the data channel the endpoint uses for session events.
pub const EVENTS_CHANNEL_LABEL: &str = "oai-events";

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-realtime";

/// Session type discriminator. The endpoint only accepts `"realtime"` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    Realtime,
}

/// Top-level session-create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCreateRequest {
    #[serde(rename = "type", default)]
    pub kind: SessionKind,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<MaxOutputTokens>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<AudioInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<AudioOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_reduction: Option<NoiseReduction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<Transcription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_detection: Option<TurnDetection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    /// Playback speed multiplier (1.0 is normal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Audio encoding on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioFormat {
    /// Signed 16-bit little-endian PCM at `rate` Hz.
    #[serde(rename = "audio/pcm")]
    Pcm { rate: u32 },
    /// G.711 µ-law.
    #[serde(rename = "audio/pcmu")]
    Pcmu,
    /// G.711 A-law.
    #[serde(rename = "audio/pcma")]
    Pcma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseReduction {
    #[serde(rename = "type")]
    pub kind: NoiseReductionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReductionKind {
    /// Close-talking microphones such as headsets.
    NearField,
    /// Far-field microphones such as laptop or room mics.
    FarField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub model: String,
    /// ISO-639-1 language code of the input audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-text hint guiding the transcription model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Voice activity detection mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnDetection {
    /// Silence-based detection.
    ServerVad {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix_padding_ms: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        silence_duration_ms: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        create_response: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interrupt_response: Option<bool>,
    },
    /// Model-based end-of-turn detection.
    SemanticVad {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eagerness: Option<Eagerness>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        create_response: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interrupt_response: Option<bool>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eagerness {
    Low,
    Medium,
    High,
    #[default]
    Auto,
}

/// Upper bound on tokens in a single response: a count or `"inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOutputTokens {
    Limit(u32),
    Inf,
}

impl Serialize for MaxOutputTokens {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limit(n) => serializer.serialize_u32(*n),
            Self::Inf => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for MaxOutputTokens {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Limit(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Limit(n) => Ok(Self::Limit(n)),
            Repr::Text(text) if text == "inf" => Ok(Self::Inf),
            Repr::Text(text) => Err(D::Error::custom(format!(
                "invalid max_output_tokens: {text}"
            ))),
        }
    }
}

/// User-facing session settings, loaded from the `[session]` config table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_instructions")]
    pub instructions: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Output playback speed multiplier.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "default_transcription_language")]
    pub transcription_language: String,
    #[serde(default = "default_transcription_prompt")]
    pub transcription_prompt: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_instructions() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_voice() -> String {
    "cedar".to_string()
}

fn default_speed() -> f64 {
    0.9
}

fn default_sample_rate() -> u32 {
    SAMPLE_RATE
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_language() -> String {
    "fa".to_string()
}

fn default_transcription_prompt() -> String {
    "expect words related to web technologies".to_string()
}

fn default_max_output_tokens() -> u32 {
    1024
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            instructions: default_instructions(),
            voice: default_voice(),
            speed: default_speed(),
            sample_rate: default_sample_rate(),
            transcription_model: default_transcription_model(),
            transcription_language: default_transcription_language(),
            transcription_prompt: default_transcription_prompt(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl SessionCreateRequest {
    /// Creates a minimal request naming only the model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            kind: SessionKind::Realtime,
            model: model.into(),
            instructions: None,
            audio: None,
            output_modalities: Vec::new(),
            max_output_tokens: None,
        }
    }

    /// Builds a voice-conversation request from `settings`.
    ///
    /// Both directions use PCM at `settings.sample_rate`; turns are detected
    /// semantically with low eagerness and the model both starts and
    /// interrupts responses on its own.
    pub fn from_settings(settings: &SessionSettings) -> Self {
        let format = AudioFormat::Pcm {
            rate: settings.sample_rate,
        };

        let input = AudioInput {
            format: Some(format),
            noise_reduction: Some(NoiseReduction {
                kind: NoiseReductionKind::NearField,
            }),
            transcription: Some(Transcription {
                model: settings.transcription_model.clone(),
                language: non_empty(&settings.transcription_language),
                prompt: non_empty(&settings.transcription_prompt),
            }),
            turn_detection: Some(TurnDetection::SemanticVad {
                eagerness: Some(Eagerness::Low),
                create_response: Some(true),
                interrupt_response: Some(true),
            }),
        };

        let output = AudioOutput {
            format: Some(format),
            speed: Some(settings.speed),
            voice: non_empty(&settings.voice),
        };

        Self {
            kind: SessionKind::Realtime,
            model: settings.model.clone(),
            instructions: non_empty(&settings.instructions),
            audio: Some(AudioConfig {
                input: Some(input),
                output: Some(output),
            }),
            output_modalities: Vec::new(),
            max_output_tokens: Some(MaxOutputTokens::Limit(settings.max_output_tokens)),
        }
    }

    /// Encodes the request as compact JSON.
    pub fn to_json(&self) -> Result<String, RealtimeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the request as indented JSON for display.
    pub fn to_json_pretty(&self) -> Result<String, RealtimeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
