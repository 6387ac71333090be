// Audio parameters of the speech service output
pub const SPEECH_SAMPLE_RATE: u32 = 24000; // 24 kHz sample rate
pub const SPEECH_CHANNELS: u16 = 1; // Mono
pub const BIT_DEPTH: u16 = 16; // 16 bits per sample
pub const BYTES_PER_SAMPLE: u16 = BIT_DEPTH / 8;

pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
