#[macro_use]
extern crate log;

use anyhow::{Context, Result};
use clap::Parser;
use clipforge::{
    audio::{self, pcm, wav::WavHeader, AudioParams, WavClip},
    cli::{
        Cli, Command, HooksCommand, InspectCommand, ScriptCommand, SpeechCommand,
        TranscodeCommand,
    },
    config::{self, Config},
    event::{self, EventBus},
    prompts::ImageAttachment,
    session::Session,
    studio::{HookRequest, ScriptRequest, SpeechRequest, Studio},
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = config::load(&cli.config).await?;

    match cli.command {
        Command::Hooks(cmd) => hooks(&config, cmd).await,
        Command::Script(cmd) => script(&config, cmd).await,
        Command::Speech(cmd) => speech(&config, cmd).await,
        Command::Transcode(cmd) => transcode(cmd).await,
        Command::Inspect(cmd) => inspect(cmd).await,
    }
}

fn start_studio(config: &Config) -> Result<Studio> {
    let bus = EventBus::new();
    event::debug(&bus);

    Ok(Studio::new(config, &bus)?)
}

async fn load_image(path: Option<&Path>) -> Result<Option<ImageAttachment>> {
    match path {
        Some(path) => Ok(Some(ImageAttachment::from_path(path).await?)),
        None => Ok(None),
    }
}

async fn hooks(config: &Config, cmd: HooksCommand) -> Result<()> {
    let studio = start_studio(config)?;

    let request = HookRequest {
        product_name: cmd.product,
        audience: cmd.audience.to_string(),
        tone: cmd.tone.to_string(),
        image: load_image(cmd.image.as_deref()).await?,
    };
    let hooks = studio.generate_hooks(&request).await?;

    for (i, hook) in hooks.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, hook.kind, hook.content);
    }

    let mut session = Session::read_or_default(&config.output.state_file).await;
    session.set_hooks(hooks);
    session.persist(&config.output.state_file).await?;

    Ok(())
}

async fn script(config: &Config, cmd: ScriptCommand) -> Result<()> {
    let studio = start_studio(config)?;
    let mut session = Session::read_or_default(&config.output.state_file).await;

    let hook = match (cmd.hook, cmd.hook_index) {
        (Some(hook), _) => hook,
        (None, Some(position)) => session
            .hook(position)
            .map(|hook| hook.content.clone())
            .with_context(|| format!("No hook #{position} in the last session"))?,
        (None, None) => String::new(),
    };

    let request = ScriptRequest {
        hook,
        max_length: cmd.length.to_string(),
        description: cmd.description,
        image: load_image(cmd.image.as_deref()).await?,
    };
    let script = studio.generate_script(&request).await?;

    println!("{}", script.full_text());

    session.script = Some(script);
    session.persist(&config.output.state_file).await?;

    Ok(())
}

async fn speech(config: &Config, cmd: SpeechCommand) -> Result<()> {
    let studio = start_studio(config)?;

    let text = match cmd.text {
        Some(text) => text,
        None => Session::read_or_default(&config.output.state_file)
            .await
            .script
            .map(|script| script.speech_text())
            .unwrap_or_default(),
    };

    let request = SpeechRequest {
        text,
        voice: cmd.voice.to_string(),
        style: cmd.style.to_string(),
        speed: cmd.speed.to_string(),
    };
    let clip = studio.generate_speech(&request).await?;

    let out_dir = cmd.out_dir.as_deref().unwrap_or(config.output.dir.as_path());
    let path = clip
        .save(out_dir, &config.output.file_prefix, request.voice_name())
        .await?;

    println!(
        "{} ({:.1}s, {} bytes)",
        path.display(),
        clip.duration_secs(),
        clip.len()
    );

    Ok(())
}

async fn transcode(cmd: TranscodeCommand) -> Result<()> {
    let params = AudioParams::new(cmd.channels, cmd.sample_rate)?;
    let options = audio::wav::WavOptions {
        byte_rate: cmd.byte_rate,
        quantization: cmd.quantization,
    };

    let input = tokio::fs::read(&cmd.input)
        .await
        .with_context(|| format!("Failed to read {}", cmd.input.display()))?;

    let clip = if cmd.raw {
        WavClip::encode(params, &pcm::pcm_bytes_to_samples(&input)?, &options)
    } else {
        let payload = String::from_utf8(input).context("Base64 payload is not UTF-8")?;
        audio::transcode(&payload, params, &options)?
    };

    clip.write_to(&cmd.output).await?;
    info!(
        "Wrote {} samples ({:.2}s) to {}",
        clip.sample_count,
        clip.duration_secs(),
        cmd.output.display()
    );

    Ok(())
}

async fn inspect(cmd: InspectCommand) -> Result<()> {
    let bytes = tokio::fs::read(&cmd.input)
        .await
        .with_context(|| format!("Failed to read {}", cmd.input.display()))?;
    let header = WavHeader::parse(&bytes)?;

    println!("channels:        {}", header.channels);
    println!("sample rate:     {} Hz", header.sample_rate);
    println!("byte rate:       {}", header.byte_rate);
    println!("block align:     {}", header.block_align);
    println!("bits per sample: {}", header.bits_per_sample);
    println!("samples:         {}", header.sample_count());

    let expected_byte_rate = header.sample_rate as u64 * header.block_align as u64;
    if header.byte_rate as u64 != expected_byte_rate {
        warn!(
            "Byte rate {} does not match sample rate * block align ({expected_byte_rate})",
            header.byte_rate
        );
    }

    match hound::WavReader::new(std::io::Cursor::new(bytes)) {
        Ok(reader) => {
            let duration = reader.duration() as f64 / reader.spec().sample_rate as f64;
            let peak = reader
                .into_samples::<i16>()
                .filter_map(Result::ok)
                .map(|sample| sample.unsigned_abs())
                .max()
                .unwrap_or(0);

            println!("duration:        {duration:.2}s");
            println!("peak:            {peak}");
        }
        Err(e) => warn!("Standard WAV readers will reject this file: {e}"),
    }

    Ok(())
}
