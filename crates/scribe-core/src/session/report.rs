//! Synthesized workshop report.

use crate::audio::PcmAudio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The markdown summary of a session, plus its optional audio overview.
///
/// Audio can only be attached to an existing report, so it never exists
/// without markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique per generation; a regenerated report gets a new id
    pub id: String,
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub audio_overview: Option<PcmAudio>,
}

impl Report {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            markdown: markdown.into(),
            generated_at: Utc::now(),
            audio_overview: None,
        }
    }

    /// File name offered when downloading the markdown.
    pub fn download_file_name(&self) -> String {
        format!("workshop-report-{}.md", self.generated_at.format("%Y-%m-%d"))
    }

    pub fn has_audio(&self) -> bool {
        self.audio_overview.is_some()
    }
}
