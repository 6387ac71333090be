//! Command line interface.

use crate::{
    audio::wav::{ByteRate, Quantization},
    catalog::{Audience, ScriptLength, SpeechSpeed, SpeechStyle, Tone, VoiceActor},
    config::DEFAULT_CONFIG_FILE,
    constants::{SPEECH_CHANNELS, SPEECH_SAMPLE_RATE},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate marketing hooks, video scripts and voice-overs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate eight viral hooks for a product
    Hooks(HooksCommand),

    /// Write a short video script around a hook
    Script(ScriptCommand),

    /// Synthesize a voice-over and save it as WAV
    Speech(SpeechCommand),

    /// Convert a base64 (or raw) 16-bit PCM payload into a WAV file
    Transcode(TranscodeCommand),

    /// Print the header of a WAV file
    Inspect(InspectCommand),
}

#[derive(Args, Debug)]
pub struct HooksCommand {
    /// Product name
    pub product: String,

    #[arg(short, long, value_enum, default_value_t)]
    pub audience: Audience,

    #[arg(short, long, value_enum, default_value_t)]
    pub tone: Tone,

    /// Optional product image
    #[arg(short, long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScriptCommand {
    /// Hook text
    #[arg(long, conflicts_with = "hook_index")]
    pub hook: Option<String>,

    /// Position of a hook from the last `hooks` run, starting at 1
    #[arg(short = 'n', long)]
    pub hook_index: Option<usize>,

    #[arg(short, long, value_enum, default_value_t)]
    pub length: ScriptLength,

    /// Product description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Product image, used instead of or alongside the description
    #[arg(short, long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SpeechCommand {
    /// Text to read, defaults to the script from the last `script` run
    #[arg(short, long)]
    pub text: Option<String>,

    #[arg(short, long, value_enum, default_value_t)]
    pub voice: VoiceActor,

    #[arg(short, long, value_enum, default_value_t)]
    pub style: SpeechStyle,

    #[arg(long, value_enum, default_value_t)]
    pub speed: SpeechSpeed,

    /// Output directory, overrides the configured one
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TranscodeCommand {
    /// File holding the payload
    pub input: PathBuf,

    /// WAV file to write
    pub output: PathBuf,

    /// Input is raw PCM bytes rather than base64
    #[arg(long)]
    pub raw: bool,

    #[arg(long, default_value_t = SPEECH_CHANNELS)]
    pub channels: u16,

    #[arg(long, default_value_t = SPEECH_SAMPLE_RATE)]
    pub sample_rate: u32,

    #[arg(long, value_enum, default_value_t)]
    pub byte_rate: ByteRate,

    #[arg(long, value_enum, default_value_t)]
    pub quantization: Quantization,
}

#[derive(Args, Debug)]
pub struct InspectCommand {
    pub input: PathBuf,
}
