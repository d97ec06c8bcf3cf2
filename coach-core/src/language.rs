//! Keyword-based language detection.

use serde::{Deserialize, Serialize};

/// Supported reply languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    Sv,
    #[default]
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sv => "sv",
            Self::En => "en",
        }
    }

    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "sv" | "sv-se" => Self::Sv,
            _ => Self::En,
        }
    }
}

const SWEDISH_CUES: [&str; 4] = ["hej", "tack", "schema", "träning"];
const ENGLISH_CUES: [&str; 4] = ["hello", "thanks", "plan", "training"];

/// Detects the language of free text by substring cues. Swedish cues win over English ones;
/// text without cues is English.
pub fn detect_language(text: &str) -> Language {
    let text = text.to_lowercase();
    if SWEDISH_CUES.iter().any(|cue| text.contains(cue)) {
        return Language::Sv;
    }
    if ENGLISH_CUES.iter().any(|cue| text.contains(cue)) {
        return Language::En;
    }
    Language::En
}
