//! Report synthesis with a fixed model fallback.
//!
//! The prompt is sent to each tier in `strategies` in order until one returns
//! text. With the default list that is one attempt on the reasoning model and,
//! if it fails, one attempt on the fast model with the identical prompt.

use crate::prompts::build_report_prompt;
use scribe_core::error::{Result, ScribeError};
use scribe_core::generation::{GenerativeService, ModelTier};
use std::sync::Arc;

/// Tiers tried for report synthesis, in order.
pub const REPORT_STRATEGIES: [ModelTier; 2] = [ModelTier::Reasoning, ModelTier::Fast];

/// Markdown produced by a successful synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedReport {
    pub markdown: String,
    /// Tier that produced the markdown
    pub tier: ModelTier,
}

pub struct ReportSynthesizer {
    service: Arc<dyn GenerativeService>,
    strategies: Vec<ModelTier>,
}

impl ReportSynthesizer {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self {
            service,
            strategies: REPORT_STRATEGIES.to_vec(),
        }
    }

    /// Synthesizes a markdown report from completed image descriptions.
    ///
    /// # Errors
    ///
    /// - `NothingToSynthesize` if `descriptions` is empty (no call is made)
    /// - the last strategy's error if every strategy fails
    pub async fn synthesize(&self, descriptions: &[String]) -> Result<SynthesizedReport> {
        if descriptions.is_empty() {
            return Err(ScribeError::NothingToSynthesize);
        }

        let prompt = build_report_prompt(descriptions)?;
        tracing::info!(
            "[ReportSynthesizer] Synthesizing report from {} description(s)",
            descriptions.len()
        );

        let mut last_error = ScribeError::internal("no report strategies configured");
        for &tier in &self.strategies {
            match self.service.generate_text(&prompt, tier).await {
                Ok(Some(markdown)) => {
                    tracing::info!("[ReportSynthesizer] Report generated with {} model", tier);
                    return Ok(SynthesizedReport { markdown, tier });
                }
                Ok(None) => {
                    tracing::warn!("[ReportSynthesizer] {} model returned no text", tier);
                    last_error = ScribeError::empty_response("report text");
                }
                Err(e) => {
                    tracing::warn!("[ReportSynthesizer] {} model failed: {}", tier, e);
                    last_error = e;
                }
            }
        }

        tracing::error!("[ReportSynthesizer] All strategies failed: {}", last_error);
        Err(last_error)
    }
}
