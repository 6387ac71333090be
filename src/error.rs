//! Error taxonomy for the audio pipeline and the generation workflows.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// Payload is not valid base64
    #[error("audio payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded payload cannot be split into 16-bit samples, or is empty when
    /// audio was expected
    #[error("invalid audio payload of {len} bytes")]
    InvalidAudioPayload { len: usize },

    #[error("invalid audio parameters: {channels} channel(s) at {sample_rate} Hz")]
    InvalidParams { channels: u16, sample_rate: u32 },

    #[error("malformed WAV header: {0}")]
    MalformedHeader(&'static str),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API Key missing")]
    MissingApiKey,

    #[error("{0}")]
    MissingInput(&'static str),

    #[error("Request to generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from generation service: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Generation service returned no content")]
    EmptyResponse,

    /// The speech call succeeded but carried no audio payload
    #[error("No audio generated")]
    NoAudio,

    #[error(transparent)]
    Audio(#[from] AudioError),
}
