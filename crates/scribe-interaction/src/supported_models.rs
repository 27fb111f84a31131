//! Supported Gemini model IDs and update procedure.
//!
//! # Models in use
//!
//! | Call | Model ID | Constant |
//! |------|----------|----------|
//! | Per-image vision analysis | `gemini-2.5-flash` | `DEFAULT_VISION_MODEL` |
//! | Report synthesis (primary) | `gemini-3-pro-preview` | `DEFAULT_REASONING_MODEL` |
//! | Report fallback, podcast script | `gemini-2.5-flash` | `DEFAULT_FAST_MODEL` |
//! | Multi-speaker speech | `gemini-2.5-flash-preview-tts` | `DEFAULT_SPEECH_MODEL` |
//!
//! Reference: <https://ai.google.dev/gemini-api/docs/models>
//!
//! # How to Update Model Versions
//!
//! 1. **Defaults** (`scribe-core/src/config.rs`)
//!    - `DEFAULT_*_MODEL` constants and `ModelConfig::default()`
//! 2. **This table** (`scribe-interaction/src/supported_models.rs`)
//!
//! ## Notes
//!
//! - The speech model must support `multiSpeakerVoiceConfig`; voices are the
//!   prebuilt `Fenrir` and `Puck` (see `scribe_core::speaker`).
//! - The speech model returns 16-bit mono PCM at 24 kHz; if a replacement
//!   model changes that, update `PipelineConfig::default()` as well.

pub use scribe_core::config::{
    DEFAULT_FAST_MODEL, DEFAULT_REASONING_MODEL, DEFAULT_SPEECH_MODEL, DEFAULT_VISION_MODEL,
};
