//! Two-stage audio overview: script generation, then speech synthesis.
//!
//! Stage two only runs once stage one has produced a non-empty script. Any
//! failure aborts the whole operation and nothing partial is returned.

use crate::prompts::build_script_prompt;
use scribe_core::audio::PcmAudio;
use scribe_core::config::PipelineConfig;
use scribe_core::error::{Result, ScribeError};
use scribe_core::generation::{GenerativeService, ModelTier};
use scribe_core::speaker::{Speaker, default_speakers, parse_script, voice_map};
use std::sync::Arc;

pub struct AudioOverviewGenerator {
    service: Arc<dyn GenerativeService>,
    speakers: Vec<Speaker>,
    pipeline: PipelineConfig,
}

impl AudioOverviewGenerator {
    pub fn new(service: Arc<dyn GenerativeService>, pipeline: PipelineConfig) -> Self {
        Self {
            service,
            speakers: default_speakers(),
            pipeline,
        }
    }

    /// Writes the dialogue script for a report.
    pub async fn write_script(&self, report_markdown: &str) -> Result<String> {
        let prompt = build_script_prompt(
            report_markdown,
            &self.speakers,
            self.pipeline.script_char_budget,
        )?;
        let script = self
            .service
            .generate_text(&prompt, ModelTier::Fast)
            .await?
            .ok_or_else(|| ScribeError::empty_response("podcast script"))?;

        let lines = parse_script(&script);
        tracing::debug!(
            "[AudioOverview] Script has {} dialogue line(s)",
            lines.len()
        );
        Ok(script)
    }

    /// Produces the audio overview for a report.
    pub async fn narrate(&self, report_markdown: &str) -> Result<PcmAudio> {
        let script = self.write_script(report_markdown).await?;

        let encoded = self
            .service
            .synthesize_speech(&script, &voice_map(&self.speakers))
            .await?
            .ok_or_else(|| ScribeError::empty_response("audio data"))?;

        let audio = PcmAudio::from_base64(&encoded, self.pipeline.sample_rate, self.pipeline.channels)?;
        tracing::info!(
            "[AudioOverview] Generated {:.1}s of audio",
            audio.duration().as_secs_f64()
        );
        Ok(audio)
    }
}
