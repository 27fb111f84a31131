//! Session domain model.
//!
//! A session is one workshop documentation unit: an ordered list of images and
//! at most one report. Sessions live only in memory and are dropped with the
//! process.

use super::image::WorkshopImage;
use super::report::Report;
use crate::audio::PcmAudio;
use crate::error::{Result, ScribeError};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents one workshop session.
///
/// A session contains:
/// - Images in the order they were added
/// - The synthesized report, if any
/// - Advisory flags for report and audio generation in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Images in insertion order
    pub images: Vec<WorkshopImage>,
    pub report: Option<Report>,
    /// Set while a report synthesis is running
    pub report_in_progress: bool,
    /// Set while an audio overview is being generated
    pub audio_in_progress: bool,
}

impl Session {
    /// Creates an empty session with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: Utc::now(),
            images: Vec::new(),
            report: None,
            report_in_progress: false,
            audio_in_progress: false,
        }
    }

    /// Creates an empty session titled `Workshop <today>`.
    pub fn with_default_title() -> Self {
        Self::new(format!("Workshop {}", Local::now().format("%Y-%m-%d")))
    }

    pub fn image(&self, image_id: &str) -> Option<&WorkshopImage> {
        self.images.iter().find(|image| image.id == image_id)
    }

    pub fn image_mut(&mut self, image_id: &str) -> Option<&mut WorkshopImage> {
        self.images.iter_mut().find(|image| image.id == image_id)
    }

    /// Appends images after the existing ones, preserving their order.
    pub fn append_images(&mut self, images: impl IntoIterator<Item = WorkshopImage>) {
        self.images.extend(images);
    }

    /// Removes an image at any status. Returns whether it was present.
    pub fn remove_image(&mut self, image_id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != image_id);
        self.images.len() != before
    }

    /// Descriptions of all successfully analysed images, in image order.
    pub fn completed_descriptions(&self) -> Vec<String> {
        self.images
            .iter()
            .filter_map(|image| image.completed_description())
            .map(str::to_string)
            .collect()
    }

    /// Replaces the report wholesale.
    pub fn set_report(&mut self, report: Report) {
        self.report = Some(report);
    }

    /// Attaches audio to the report with id `report_id`.
    ///
    /// Returns `Ok(false)` when the report has since been regenerated, in which
    /// case the audio is discarded.
    pub fn attach_audio(&mut self, report_id: &str, audio: PcmAudio) -> Result<bool> {
        let report = self
            .report
            .as_mut()
            .ok_or_else(|| ScribeError::MissingReport(self.id.clone()))?;
        if report.id != report_id {
            return Ok(false);
        }
        report.audio_overview = Some(audio);
        Ok(true)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            image_count: self.images.len(),
            report_ready: self.report.is_some(),
        }
    }
}

/// Dashboard listing entry for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub image_count: usize,
    /// `true` shows "Report Ready", `false` shows "Draft"
    pub report_ready: bool,
}

/// Which tab of the active session is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Photos,
    Report,
}
