//! Options offered to the user when generating content.
//!
//! Each option displays as the Indonesian label that is placed into the
//! prompt verbatim.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! labelled {
    ($name:ident { $($(#[$attr:meta])* $variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize,
        )]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($(#[$attr])* $variant),+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

labelled!(Audience {
    #[default]
    General => "Umum",
    Students => "Pelajar & Mahasiswa",
    OfficeWorkers => "Pekerja Kantoran",
    Housewives => "Ibu Rumah Tangga",
    Gamers => "Gamers",
    TechLovers => "Pecinta Teknologi",
    Fashionistas => "Fashionista",
});

labelled!(Tone {
    Formal => "Formal",
    #[default]
    Casual => "Santai",
    Persuasive => "Persuasif",
    Informative => "Informatif",
    Emotional => "Emosional",
    Slang => "Gaul",
});

labelled!(ScriptLength {
    Short => "200 Karakter",
    #[default]
    Medium => "300 Karakter",
    Long => "400 Karakter",
    Xl => "500 Karakter",
    Xxl => "600 Karakter",
});

labelled!(VoiceActor {
    Puck => "Puck (Pria - Energik/TikTok)",
    #[default]
    Kore => "Kore (Wanita - Hangat/Narasi)",
    Fenrir => "Fenrir (Pria - Berat/Wibawa)",
    Zephyr => "Zephyr (Wanita - Lembut/ASMR)",
    Charon => "Charon (Pria - Deep/Misterius)",
});

labelled!(SpeechStyle {
    #[default]
    Hyped => "Hype & Viral (Cepat/Semangat)",
    Storyteller => "Storytelling (Mengalir)",
    News => "Berita/Formal (Jelas)",
    Sad => "Sedih/Emosional",
    Whisper => "Berbisik/Misterius",
    Angry => "Tegas/Marah",
});

labelled!(SpeechSpeed {
    Slow => "Lambat (0.75x)",
    #[default]
    Normal => "Normal (1.0x)",
    Fast => "Cepat (1.25x)",
    SuperFast => "Ngebut (1.5x)",
});

impl VoiceActor {
    /// Prebuilt voice name understood by the speech model ("Kore")
    pub fn voice_name(self) -> &'static str {
        voice_name_from_label(self.label())
    }
}

/// First word of a voice label: "Kore (Wanita - Hangat/Narasi)" -> "Kore"
pub fn voice_name_from_label(label: &str) -> &str {
    label.split(' ').next().unwrap_or(label)
}

impl SpeechStyle {
    /// Detailed delivery instruction for the speech model.
    pub fn instruction(self) -> &'static str {
        match self {
            SpeechStyle::Hyped => {
                "Bicaralah dengan energi TINGGI, antusias, dan sangat \"punchy\". Bayangkan Anda adalah content creator TikTok yang sedang mempromosikan produk viral. Jangan ada jeda yang canggung. Pertahankan excitement dari awal sampai akhir."
            }
            SpeechStyle::Storyteller => {
                "Gunakan nada bercerita yang hangat, akrab, dan natural. Seperti sedang curhat kepada sahabat dekat. Intonasi harus dinamis (naik turun) tapi tetap lembut. Jangan kaku seperti robot."
            }
            SpeechStyle::News => {
                "Gunakan nada profesional, wibawa, dan jelas artikulasinya. Seperti pembaca berita TV atau presenter dokumenter. Tempo stabil dan terpercaya."
            }
            SpeechStyle::Sad => {
                "Gunakan nada rendah, agak lambat, dan penuh perasaan. Terdengar menyentuh hati dan sedikit melankolis. Berikan jeda untuk efek dramatis."
            }
            SpeechStyle::Whisper => {
                "Gunakan suara \"soft whisper\" atau berbisik dekat mic. Terdengar rahasia, penting, dan membuat orang penasaran (ASMR style)."
            }
            SpeechStyle::Angry => {
                "Gunakan nada tegas, volume agak keras, dan menuntut perhatian. Tunjukkan urgensi yang tinggi."
            }
        }
    }
}

/// Style instruction for a free-form style label. Known labels map to their
/// detailed instruction, anything else is used as-is.
pub fn style_instruction(style: &str) -> &str {
    SpeechStyle::value_variants()
        .iter()
        .find(|known| known.label() == style)
        .map(|known| known.instruction())
        .unwrap_or(style)
}
