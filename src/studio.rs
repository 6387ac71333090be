//! Generation workflows: marketing hooks, video scripts and speech clips.
//!
//! Every workflow reports its progress on the event bus so that whatever
//! drives the studio can show a loading state and a user-facing failure
//! message.

use crate::{
    audio::{self, wav::WavOptions, AudioParams, WavClip},
    catalog::{style_instruction, voice_name_from_label},
    config::Config,
    error::GenerationError,
    event::{Event, EventBus},
    gemini::{GeminiClient, GenerateContentRequest, GenerationConfig, Part},
    prompts::{self, ImageAttachment, IMAGE_ONLY_DESCRIPTION},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{
    fmt::{Display, Formatter},
    future::Future,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HookItem {
    /// Hook theory, e.g. "Question Hook"
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedScript {
    pub hook: String,
    pub body: String,
    pub cta: String,
}

impl GeneratedScript {
    /// Format used when copying the whole script
    pub fn full_text(&self) -> String {
        format!(
            "Hook: {}\n\nIsi: {}\n\nCTA: {}",
            self.hook, self.body, self.cta
        )
    }

    /// Text handed to speech generation
    pub fn speech_text(&self) -> String {
        format!("{} ... {} ... {}", self.hook, self.body, self.cta)
    }
}

#[derive(Clone, Debug, Default)]
pub struct HookRequest {
    pub product_name: String,
    pub audience: String,
    pub tone: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Clone, Debug, Default)]
pub struct ScriptRequest {
    pub hook: String,
    pub max_length: String,
    pub description: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Clone, Debug, Default)]
pub struct SpeechRequest {
    pub text: String,
    /// Voice label or bare prebuilt voice name
    pub voice: String,
    pub style: String,
    pub speed: String,
}

impl SpeechRequest {
    pub fn voice_name(&self) -> &str {
        voice_name_from_label(&self.voice)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Hooks,
    Script,
    Speech,
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::Hooks => write!(f, "hook generation"),
            Task::Script => write!(f, "script generation"),
            Task::Speech => write!(f, "speech generation"),
        }
    }
}

impl Task {
    fn failure_message(self) -> &'static str {
        match self {
            Task::Hooks => "Terjadi kesalahan saat generate hook.",
            Task::Script => "Gagal membuat script",
            Task::Speech => "Gagal membuat audio",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudioEvent {
    Started { task: Task },
    Finished { task: Task },
    Failed { task: Task, message: String },
}

/// Message shown to the user when `task` fails with `error`.
pub fn user_message(task: Task, error: &GenerationError) -> String {
    match error {
        GenerationError::MissingInput(message) => message.to_string(),
        GenerationError::MissingApiKey => error.to_string(),
        GenerationError::NoAudio => {
            format!("{}: tidak ada audio yang dihasilkan", task.failure_message())
        }
        GenerationError::Audio(_) => {
            format!("{}: data audio tidak valid", task.failure_message())
        }
        _ => task.failure_message().to_string(),
    }
}

pub struct Studio {
    client: GeminiClient,
    bus: EventBus,
    text_model: String,
    speech_model: String,
    params: AudioParams,
    wav_options: WavOptions,
}

impl Studio {
    pub fn new(config: &Config, bus: &EventBus) -> Result<Self, GenerationError> {
        Ok(Self {
            client: GeminiClient::new(&config.gemini)?,
            bus: bus.clone(),
            text_model: config.gemini.text_model.clone(),
            speech_model: config.gemini.speech_model.clone(),
            params: config.audio.params()?,
            wav_options: config.audio.wav_options(),
        })
    }

    async fn run<T, F>(&self, task: Task, work: F) -> Result<T, GenerationError>
    where
        F: Future<Output = Result<T, GenerationError>>,
    {
        info!("Starting {task}");
        self.bus.send(Event::Studio(StudioEvent::Started { task }));

        let result = work.await;

        match &result {
            Ok(_) => {
                info!("Finished {task}");
                self.bus.send(Event::Studio(StudioEvent::Finished { task }));
            }
            Err(e) => {
                error!("Error during {task}: {e}");
                self.bus.send(Event::Studio(StudioEvent::Failed {
                    task,
                    message: user_message(task, e),
                }));
            }
        }

        result
    }

    pub async fn generate_hooks(
        &self,
        request: &HookRequest,
    ) -> Result<Vec<HookItem>, GenerationError> {
        self.run(Task::Hooks, async {
            if request.product_name.trim().is_empty() {
                return Err(GenerationError::MissingInput("Nama produk harus diisi"));
            }

            let prompt =
                prompts::hooks_prompt(&request.product_name, &request.audience, &request.tone);
            let parts = with_image(prompt, request.image.as_ref());
            let schema = json!({
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "description": "The type of hook (e.g., Question Hook)" },
                        "content": { "type": "STRING", "description": "The actual hook text" }
                    },
                    "required": ["type", "content"]
                }
            });

            let response = self
                .client
                .generate_content(
                    &self.text_model,
                    &GenerateContentRequest::new(parts, GenerationConfig::json(schema)),
                )
                .await?;

            match response.text() {
                Some(text) => Ok(serde_json::from_str::<Vec<HookItem>>(&text)?),
                None => {
                    warn!("Hook generation returned no text");
                    Ok(vec![])
                }
            }
        })
        .await
    }

    pub async fn generate_script(
        &self,
        request: &ScriptRequest,
    ) -> Result<GeneratedScript, GenerationError> {
        self.run(Task::Script, async {
            if request.hook.trim().is_empty() {
                return Err(GenerationError::MissingInput("Pilih hook terlebih dahulu"));
            }

            let description = match (&request.image, request.description.trim().is_empty()) {
                (_, false) => request.description.as_str(),
                (Some(_), true) => IMAGE_ONLY_DESCRIPTION,
                (None, true) => {
                    return Err(GenerationError::MissingInput("Deskripsi produk wajib diisi"));
                }
            };

            let prompt = prompts::script_prompt(&request.hook, &request.max_length, description);
            let parts = with_image(prompt, request.image.as_ref());
            let schema = json!({
                "type": "OBJECT",
                "properties": {
                    "hook": { "type": "STRING" },
                    "body": { "type": "STRING" },
                    "cta": { "type": "STRING" }
                },
                "required": ["hook", "body", "cta"]
            });

            let response = self
                .client
                .generate_content(
                    &self.text_model,
                    &GenerateContentRequest::new(parts, GenerationConfig::json(schema)),
                )
                .await?;

            let text = response.text().ok_or(GenerationError::EmptyResponse)?;
            Ok(serde_json::from_str::<GeneratedScript>(&text)?)
        })
        .await
    }

    pub async fn generate_speech(
        &self,
        request: &SpeechRequest,
    ) -> Result<WavClip, GenerationError> {
        self.run(Task::Speech, async {
            if request.text.trim().is_empty() {
                return Err(GenerationError::MissingInput("Masukkan teks terlebih dahulu"));
            }

            let prompt = prompts::speech_prompt(
                &request.text,
                style_instruction(&request.style),
                &request.speed,
            );

            let response = self
                .client
                .generate_content(
                    &self.speech_model,
                    &GenerateContentRequest::new(
                        vec![Part::text(prompt)],
                        GenerationConfig::audio(request.voice_name()),
                    ),
                )
                .await?;

            let payload = response.inline_audio().ok_or(GenerationError::NoAudio)?;
            let clip = audio::transcode(payload, self.params, &self.wav_options)?;

            debug!(
                "Speech clip: {} samples, {:.2}s",
                clip.sample_count,
                clip.duration_secs()
            );

            Ok(clip)
        })
        .await
    }
}

fn with_image(prompt: String, image: Option<&ImageAttachment>) -> Vec<Part> {
    let mut parts = vec![Part::text(prompt)];

    if let Some(image) = image {
        parts.push(Part::inline(&image.mime_type, &image.data));
    }

    parts
}
