//! Raw PCM frame conversion between audio buffers and RTP payloads.
//!
//! Microphone frames are signed 16-bit samples sent little-endian; payloads
//! received from the remote track carry big-endian samples and are decoded
//! into a fixed playback buffer.

use std::time::Duration;

/// Sample rate of both audio directions, in Hz.
pub const SAMPLE_RATE: u32 = 24_000;

/// Mono audio.
pub const CHANNELS: u16 = 1;

/// Samples per frame: 20 ms at 24 kHz.
pub const FRAME_SIZE: usize = 480;

pub const FRAME_DURATION: Duration = Duration::from_millis(20);

/// Encodes samples as little-endian bytes, two per sample.
pub fn encode_le(samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Decodes big-endian sample pairs from `payload` into `out`.
///
/// Returns the number of samples written, which is bounded by both
/// `out.len()` and `payload.len() / 2`. A trailing odd byte is ignored and
/// samples past the returned count are left untouched.
pub fn decode_be_into(payload: &[u8], out: &mut [i16]) -> usize {
    let mut written = 0;
    for (slot, pair) in out.iter_mut().zip(payload.chunks_exact(2)) {
        *slot = i16::from_be_bytes([pair[0], pair[1]]);
        written += 1;
    }
    written
}

/// Playback duration of `samples` mono samples at `rate` Hz.
///
/// A zero rate yields a zero duration.
pub fn frame_duration(samples: usize, rate: u32) -> Duration {
    if rate == 0 {
        return Duration::ZERO;
    }
    let nanos = samples as u128 * 1_000_000_000 / u128::from(rate);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
