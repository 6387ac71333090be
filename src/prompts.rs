//! Prompt construction for the hook, script and speech workflows.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

const DEFAULT_IMAGE_MIME: &str = "image/png";

lazy_static! {
    static ref DATA_URL_RE: Regex = Regex::new(r"^data:(.*);base64,").unwrap();
}

/// The eight hook theories requested for every product
pub const HOOK_THEORIES: [&str; 8] = [
    "Question Hook",
    "Desire Hook",
    "Hope Hook",
    "Problem Hook",
    "Benefit Hook",
    "Controversial Hook",
    "FOMO Hook",
    "Fear Hook",
];

/// Description used when the product is described by an image only
pub const IMAGE_ONLY_DESCRIPTION: &str = "Analyze this image for product details";

/// An image sent inline alongside a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    /// Base64 without any `data:` prefix
    pub data: String,
}

impl ImageAttachment {
    /// Accepts either a `data:<mime>;base64,<data>` URL or bare base64, which
    /// is assumed to be PNG.
    pub fn from_data_url(input: &str) -> Self {
        let mime_type = DATA_URL_RE
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|mime| mime.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
        let data = DATA_URL_RE.replace(input, "").into_owned();

        Self { mime_type, data }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;

        Ok(Self {
            mime_type: mime_type_for(path).to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => DEFAULT_IMAGE_MIME,
    }
}

pub fn hooks_prompt(product_name: &str, audience: &str, tone: &str) -> String {
    let theories = HOOK_THEORIES
        .iter()
        .enumerate()
        .map(|(i, theory)| format!("{}. {}", i + 1, theory))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I need you to act as a viral marketing expert.
Product Name: {product_name}
Target Audience: {audience}
Tone: {tone}

Create {count} different viral marketing hooks for a short video (TikTok/Reels).
The hooks should be based on these specific theories:
{theories}

Output valid JSON strictly.",
        count = HOOK_THEORIES.len(),
    )
}

pub fn script_prompt(hook: &str, max_length: &str, description: &str) -> String {
    format!(
        "Create a viral short video script (TikTok/Reels).

Selected Hook: \"{hook}\"
Maximum Length: {max_length}

Product Description/Context:
{description}

Structure the response strictly as a JSON object with 3 parts:
1. \"hook\" (The hook provided)
2. \"body\" (The main content, engaging and concise)
3. \"cta\" (Call to Action)"
    )
}

pub fn speech_prompt(text: &str, style_instruction: &str, speed: &str) -> String {
    format!(
        "TASK: Generate audio speech from the text below.
LANGUAGE: Indonesian (Bahasa Indonesia).

CRITICAL INSTRUCTIONS FOR CONSISTENCY:
1. ACCENT: You MUST use a native Indonesian accent/intonation. Do NOT sound like a foreigner reading Indonesian.
2. CONSISTENCY: Maintain the selected emotion/tone strictly throughout the entire text. Do not drop the character halfway.
3. CLARITY: Articulate every word clearly.

STYLE GUIDELINE:
\"{style_instruction}\"

SPEED GUIDELINE:
\"{speed}\"

TEXT TO READ:
\"{text}\""
    )
}
