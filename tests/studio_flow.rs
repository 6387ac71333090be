//! Integration tests for the generation workflows.
//!
//! Tests hooks -> script -> speech against a mocked generation service.

mod common;

use common::*;
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

/// Test that hooks are requested as JSON and parsed from the response.
#[tokio::test]
async fn test_generate_hooks() {
    let harness = TestHarness::new().await;
    let mut subscriber = harness.subscribe();

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&hooks_json())))
        .expect(1)
        .mount(&harness.server)
        .await;

    let request = HookRequest {
        product_name: "Kopi Susu Gula Aren".to_string(),
        audience: "Pekerja Kantoran".to_string(),
        tone: "Santai".to_string(),
        image: None,
    };
    let hooks = harness.studio.generate_hooks(&request).await.unwrap();

    assert_eq!(hooks.len(), 2);
    assert_eq!(hooks[0].kind, "Question Hook");
    assert_eq!(hooks[1].content, "Semua orang udah coba, kamu kapan?");

    let events = drain_studio_events(&mut subscriber).await;
    assert_eq!(
        events,
        vec![
            StudioEvent::Started { task: Task::Hooks },
            StudioEvent::Finished { task: Task::Hooks },
        ]
    );
}

/// Test the request body sent for hook generation.
#[tokio::test]
async fn test_hooks_request_body() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("[]")))
        .mount(&harness.server)
        .await;

    let request = HookRequest {
        product_name: "Sepatu Lari".to_string(),
        audience: "Umum".to_string(),
        tone: "Gaul".to_string(),
        image: Some(clipforge::prompts::ImageAttachment::from_data_url(
            "data:image/webp;base64,UklGRg==",
        )),
    };
    let hooks = harness.studio.generate_hooks(&request).await.unwrap();
    assert!(hooks.is_empty());

    let received = harness.server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);

    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let parts = &body["contents"][0]["parts"];
    assert!(parts[0]["text"]
        .as_str()
        .unwrap()
        .contains("Product Name: Sepatu Lari"));
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/webp");
    assert_eq!(parts[1]["inlineData"]["data"], "UklGRg==");
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
}

/// Test that a response without text yields no hooks rather than an error.
#[tokio::test]
async fn test_hooks_without_text() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&harness.server)
        .await;

    let request = HookRequest {
        product_name: "Kopi".to_string(),
        ..Default::default()
    };

    assert!(harness.studio.generate_hooks(&request).await.unwrap().is_empty());
}

/// Test script generation with a description.
#[tokio::test]
async fn test_generate_script() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&script_json())))
        .expect(1)
        .mount(&harness.server)
        .await;

    let request = ScriptRequest {
        hook: "Pernah nggak sih ngantuk jam 2 siang?".to_string(),
        max_length: "300 Karakter".to_string(),
        description: "Kopi susu literan".to_string(),
        image: None,
    };
    let script = harness.studio.generate_script(&request).await.unwrap();

    assert_eq!(script.cta, "Klik keranjang kuning sekarang!");
    assert!(script.full_text().starts_with("Hook: Pernah nggak"));
}

/// Test that an image stands in for a missing description.
#[tokio::test]
async fn test_script_with_image_only() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&script_json())))
        .mount(&harness.server)
        .await;

    let request = ScriptRequest {
        hook: "Hook".to_string(),
        max_length: "200 Karakter".to_string(),
        description: "   ".to_string(),
        image: Some(clipforge::prompts::ImageAttachment::from_data_url("iVBORw0KGgo=")),
    };
    harness.studio.generate_script(&request).await.unwrap();

    let received = harness.server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

    assert!(prompt.contains("Analyze this image for product details"));
    assert_eq!(
        body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
        "image/png"
    );
}

/// Test speech generation end to end.
#[tokio::test]
async fn test_generate_speech() {
    let harness = TestHarness::new().await;
    let mut subscriber = harness.subscribe();

    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_response(&pcm_base64(&[0, -16384, 16384, -32768]))),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let request = SpeechRequest {
        text: "Halo semuanya".to_string(),
        voice: "Puck (Pria - Energik/TikTok)".to_string(),
        style: "Berbisik/Misterius".to_string(),
        speed: "Lambat (0.75x)".to_string(),
    };
    let clip = harness.studio.generate_speech(&request).await.unwrap();

    assert_eq!(clip.sample_count, 4);
    assert_eq!(clip.params, AudioParams::speech());

    let reader = hound::WavReader::new(std::io::Cursor::new(clip.into_bytes())).unwrap();
    let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
    assert_eq!(samples, vec![0, -16384, 16383, -32768]);

    let received = harness.server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let config = &body["generationConfig"];
    assert_eq!(config["responseModalities"][0], "AUDIO");
    assert_eq!(
        config["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Puck"
    );

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"soft whisper\" atau berbisik dekat mic"));
    assert!(!prompt.contains("Berbisik/Misterius"));
    assert!(prompt.contains("Lambat (0.75x)"));
    assert!(prompt.contains("\"Halo semuanya\""));

    let events = drain_studio_events(&mut subscriber).await;
    assert_eq!(events.last(), Some(&StudioEvent::Finished { task: Task::Speech }));
}

/// Test hooks -> script -> speech, carrying results through the session.
#[tokio::test]
async fn test_full_flow_through_session() {
    let harness = TestHarness::new().await;
    let dir = tempfile::TempDir::new().unwrap();
    let state_file = dir.path().join("studio_state.json");

    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&pcm_base64(&[1, 2]))))
        .mount(&harness.server)
        .await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&hooks_json())))
        .up_to_n_times(1)
        .mount(&harness.server)
        .await;

    let hooks = harness
        .studio
        .generate_hooks(&HookRequest {
            product_name: "Kopi".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut session = Session::read_or_default(&state_file).await;
    session.set_hooks(hooks);
    session.persist(&state_file).await.unwrap();

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&script_json())))
        .mount(&harness.server)
        .await;

    let mut session = Session::read_or_default(&state_file).await;
    let hook = session.hook(1).unwrap().content.clone();
    let script = harness
        .studio
        .generate_script(&ScriptRequest {
            hook,
            max_length: "300 Karakter".to_string(),
            description: "Kopi susu".to_string(),
            image: None,
        })
        .await
        .unwrap();
    session.script = Some(script);
    session.persist(&state_file).await.unwrap();

    let session = Session::read_or_default(&state_file).await;
    let text = session.script.unwrap().speech_text();
    assert!(text.contains(" ... "));

    let clip = harness
        .studio
        .generate_speech(&SpeechRequest {
            text,
            voice: "Kore".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let path = clip.save(dir.path(), "clipforge", "Kore").await.unwrap();
    assert!(path.exists());
}
