//! Base64 PCM decoder.
//!
//! The speech service returns raw signed 16-bit little-endian PCM wrapped in
//! base64. This turns it into normalized `f32` samples.

use crate::error::AudioError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use byteorder::{ByteOrder, LittleEndian};

/// Divisor mapping `i16` onto [-1.0, 1.0).
pub const PCM_SCALE: f32 = 32768.0;

/// Decode a base64 payload of 16-bit PCM into normalized samples.
///
/// An empty payload decodes to an empty buffer. A payload whose decoded
/// length is odd is rejected instead of silently dropping the last byte.
pub fn decode_base64_pcm(payload: &str) -> Result<Vec<f32>, AudioError> {
    let bytes = STANDARD.decode(payload.trim())?;
    pcm_bytes_to_samples(&bytes)
}

/// Reinterpret raw little-endian 16-bit PCM bytes as normalized samples.
pub fn pcm_bytes_to_samples(bytes: &[u8]) -> Result<Vec<f32>, AudioError> {
    if bytes.len() % 2 != 0 {
        return Err(AudioError::InvalidAudioPayload { len: bytes.len() });
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| LittleEndian::read_i16(pair) as f32 / PCM_SCALE)
        .collect();

    Ok(samples)
}
