//! Generation service boundary.
//!
//! The hosted multimodal service is reached through three calls: vision
//! analysis of one image, text generation at a model tier, and multi-speaker
//! speech synthesis. Everything above this trait is provider-agnostic.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability tier for text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Higher-capability reasoning model
    Reasoning,
    /// Faster, lower-capability model
    Fast,
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTier::Reasoning => write!(f, "reasoning"),
            ModelTier::Fast => write!(f, "fast"),
        }
    }
}

/// An image ready for transmission: base64 payload plus declared media type.
#[derive(Debug, Clone, Copy)]
pub struct InlineImage<'a> {
    pub mime_type: &'a str,
    pub base64_data: &'a str,
}

/// Mapping from a speaker name in the script to a prebuilt voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice_name: String,
}

/// The voices used by a multi-speaker synthesis request.
pub type VoiceMap = Vec<SpeakerVoice>;

/// Black-box access to the hosted generation service.
///
/// Every call returns `Ok(None)` when the service answered successfully but
/// carried no usable payload; transport and API failures are `Err`.
#[async_trait::async_trait]
pub trait GenerativeService: Send + Sync {
    /// Sends one image with an instruction and returns the model's text.
    async fn analyze_image(
        &self,
        image: InlineImage<'_>,
        instruction: &str,
    ) -> Result<Option<String>>;

    /// Generates text for a prompt using the model of the given tier.
    async fn generate_text(&self, prompt: &str, tier: ModelTier) -> Result<Option<String>>;

    /// Speaks a `Speaker: line` script and returns base64-encoded raw PCM.
    async fn synthesize_speech(&self, script: &str, voices: &VoiceMap) -> Result<Option<String>>;
}
