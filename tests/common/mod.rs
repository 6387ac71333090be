//! Test infrastructure for clipforge integration tests.
//!
//! Provides a mocked generation service, response builders and helpers for
//! collecting studio events.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use wiremock::MockServer;

// Re-export key types from the main crate
pub use clipforge::audio::{self, wav::WavOptions, AudioParams, WavClip};
pub use clipforge::config::{Config, GeminiConfig};
pub use clipforge::error::{AudioError, GenerationError};
pub use clipforge::event::{Event, EventBus, Subscriber};
pub use clipforge::session::Session;
pub use clipforge::studio::{
    GeneratedScript, HookItem, HookRequest, ScriptRequest, SpeechRequest, Studio, StudioEvent,
    Task,
};

pub const TEST_API_KEY: &str = "test-key";
pub const TEXT_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
pub const SPEECH_PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";

/// Creates a configuration pointing at the mock server.
pub fn test_config(base_url: &str) -> Config {
    Config {
        gemini: GeminiConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Test harness that wraps a mock server, an EventBus and a Studio.
pub struct TestHarness {
    pub server: MockServer,
    pub bus: EventBus,
    pub studio: Studio,
}

impl TestHarness {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let bus = EventBus::new();
        let studio = Studio::new(&test_config(&server.uri()), &bus).unwrap();

        Self {
            server,
            bus,
            studio,
        }
    }

    pub fn subscribe(&self) -> Subscriber {
        self.bus.subscribe()
    }
}

/// A successful response whose only part is `text`.
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// A successful response carrying base64 audio.
pub fn audio_response(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": data } }]
            }
        }]
    })
}

/// Encodes 16-bit samples the way the speech service delivers them.
pub fn pcm_base64(samples: &[i16]) -> String {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}

pub fn hooks_json() -> String {
    json!([
        { "type": "Question Hook", "content": "Pernah nggak sih ngantuk jam 2 siang?" },
        { "type": "FOMO Hook", "content": "Semua orang udah coba, kamu kapan?" }
    ])
    .to_string()
}

pub fn script_json() -> String {
    json!({
        "hook": "Pernah nggak sih ngantuk jam 2 siang?",
        "body": "Kopi susu ini bikin melek tanpa bikin deg-degan.",
        "cta": "Klik keranjang kuning sekarang!"
    })
    .to_string()
}

/// Collects all events from a subscriber within a timeout period.
/// Returns events in the order they were received.
pub async fn collect_events(subscriber: &mut Subscriber, timeout: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        match subscriber.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) => {
                if tokio::time::Instant::now() >= deadline {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Err(TryRecvError::Lagged(n)) => {
                eprintln!("Warning: subscriber lagged, missed {n} events");
            }
            Err(TryRecvError::Closed) => break,
        }
    }

    events
}

/// Studio events only, in order.
pub fn studio_events(events: Vec<Event>) -> Vec<StudioEvent> {
    events
        .into_iter()
        .map(|event| match event {
            Event::Studio(event) => event,
        })
        .collect()
}

/// Waits briefly and returns the studio events seen so far.
pub async fn drain_studio_events(subscriber: &mut Subscriber) -> Vec<StudioEvent> {
    studio_events(collect_events(subscriber, Duration::from_millis(50)).await)
}
