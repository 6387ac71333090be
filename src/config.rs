use crate::{
    audio::{
        wav::{ByteRate, Quantization, WavOptions},
        AudioParams,
    },
    constants::{GEMINI_BASE_URL, SPEECH_CHANNELS, SPEECH_MODEL, SPEECH_SAMPLE_RATE, TEXT_MODEL},
    error::AudioError,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;

pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

/// Environment variables checked, in order, when no key is configured
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub speech_model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: GEMINI_BASE_URL.to_string(),
            text_model: TEXT_MODEL.to_string(),
            speech_model: SPEECH_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: ByteRate,
    pub quantization: Quantization,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            channels: SPEECH_CHANNELS,
            sample_rate: SPEECH_SAMPLE_RATE,
            byte_rate: ByteRate::default(),
            quantization: Quantization::default(),
        }
    }
}

impl AudioConfig {
    pub fn params(&self) -> Result<AudioParams, AudioError> {
        AudioParams::new(self.channels, self.sample_rate)
    }

    pub fn wav_options(&self) -> WavOptions {
        WavOptions {
            byte_rate: self.byte_rate,
            quantization: self.quantization,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated clips are written to
    pub dir: PathBuf,

    /// Clip names are `<file_prefix>-<voice>-<unix millis>.wav`
    pub file_prefix: String,

    /// Hooks and script of the last session
    pub state_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("."),
            file_prefix: "clipforge".to_string(),
            state_file: PathBuf::from("studio_state.json"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub audio: AudioConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents).context("Failed to parse config")?;
        Ok(config)
    }

    /// Fill in the API key from the environment unless one is configured
    pub fn apply_env(&mut self) {
        self.apply_env_with(|var| std::env::var(var).ok());
    }

    /// Same as `apply_env`, reading variables through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.gemini.api_key.as_deref().is_some_and(|key| !key.is_empty()) {
            return;
        }

        self.gemini.api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| lookup(*var).filter(|key| !key.is_empty()));
    }
}

/// Load `path`, falling back to defaults when the file does not exist.
pub async fn load(path: &Path) -> Result<Config> {
    let mut config = match read_to_string(path).await {
        Ok(contents) => Config::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config file at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    config.apply_env();

    Ok(config)
}
