use serde::{Deserialize, Serialize};

/// Model used for per-image vision analysis.
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";
/// Higher-capability model tried first for report synthesis.
pub const DEFAULT_REASONING_MODEL: &str = "gemini-3-pro-preview";
/// Faster model used for the report fallback and the podcast script.
pub const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash";
/// Multi-speaker text-to-speech model.
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Root structure of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credential.
#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Model identifiers for each call the pipeline makes.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub vision: String,
    pub reasoning: String,
    pub fast: String,
    pub speech: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vision: DEFAULT_VISION_MODEL.to_string(),
            reasoning: DEFAULT_REASONING_MODEL.to_string(),
            fast: DEFAULT_FAST_MODEL.to_string(),
            speech: DEFAULT_SPEECH_MODEL.to_string(),
        }
    }
}

/// Fixed limits of the synthesis pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum number of report characters embedded in the script prompt
    pub script_char_budget: usize,
    /// Sample rate of the PCM returned by the speech model
    pub sample_rate: u32,
    /// Channel count of the PCM returned by the speech model
    pub channels: u16,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            script_char_budget: 8000,
            sample_rate: 24_000,
            channels: 1,
        }
    }
}
