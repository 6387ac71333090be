//! Speech audio pipeline: base64 PCM in, WAV container out.

pub mod pcm;
pub mod wav;

use crate::{
    constants::{BYTES_PER_SAMPLE, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE},
    error::AudioError,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use wav::WavOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudioParams {
    pub channels: u16,
    pub sample_rate: u32,
}

impl AudioParams {
    pub fn new(channels: u16, sample_rate: u32) -> Result<Self, AudioError> {
        if channels == 0 || sample_rate == 0 {
            return Err(AudioError::InvalidParams {
                channels,
                sample_rate,
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Format of the speech service output: mono at 24 kHz
    pub fn speech() -> Self {
        Self {
            channels: SPEECH_CHANNELS,
            sample_rate: SPEECH_SAMPLE_RATE,
        }
    }
}

impl Default for AudioParams {
    fn default() -> Self {
        Self::speech()
    }
}

/// An encoded WAV file, owned by whoever requested it.
#[derive(Clone, Debug)]
pub struct WavClip {
    pub params: AudioParams,
    pub sample_count: usize,
    bytes: Vec<u8>,
}

impl WavClip {
    pub fn encode(params: AudioParams, samples: &[f32], options: &WavOptions) -> Self {
        Self {
            params,
            sample_count: samples.len(),
            bytes: wav::encode_wav(&params, samples, options),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a header-only clip
    pub fn has_no_samples(&self) -> bool {
        self.sample_count == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn duration_secs(&self) -> f64 {
        let frames = self.sample_count as f64 / self.params.channels as f64;
        frames / self.params.sample_rate as f64
    }

    /// File name for a downloaded clip, e.g. `clipforge-Kore-1700000000000.wav`
    pub fn file_name(prefix: &str, voice: &str, unix_millis: u128) -> String {
        format!("{prefix}-{voice}-{unix_millis}.wav")
    }

    /// Writes the clip into `dir` (temp file, then rename) and returns its path.
    pub async fn save(&self, dir: &Path, prefix: &str, voice: &str) -> Result<PathBuf> {
        let unix_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the unix epoch")?
            .as_millis();

        let path = dir.join(Self::file_name(prefix, voice, unix_millis));
        self.write_to(&path).await?;

        Ok(path)
    }

    pub async fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("wav.tmp");
        tokio::fs::write(&tmp_path, &self.bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .with_context(|| format!("Failed to move clip to {}", path.display()))?;

        debug!(
            "Wrote {} bytes ({:.2}s of audio) to {}",
            self.len(),
            self.duration_secs(),
            path.display()
        );

        Ok(())
    }
}

/// Decode a base64 PCM payload and wrap it in a WAV container.
///
/// Audio is expected here, so an empty payload is an error.
pub fn transcode(
    payload: &str,
    params: AudioParams,
    options: &WavOptions,
) -> Result<WavClip, AudioError> {
    let samples = pcm::decode_base64_pcm(payload)?;

    if samples.is_empty() {
        return Err(AudioError::InvalidAudioPayload { len: 0 });
    }

    trace!(
        "Decoded {} samples ({} bytes of PCM)",
        samples.len(),
        samples.len() * BYTES_PER_SAMPLE as usize
    );

    Ok(WavClip::encode(params, &samples, options))
}
