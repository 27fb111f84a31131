//! Workshop image model and its analysis state machine.

use crate::error::{Result, ScribeError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Analysis status of a single image.
///
/// Transitions follow `Pending -> Analyzing -> Done | Error`; the last two are
/// terminal and there is no automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Pending,
    Analyzing,
    Done,
    Error,
}

impl ImageStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ImageStatus::Done | ImageStatus::Error)
    }

    pub fn can_transition_to(self, next: ImageStatus) -> bool {
        matches!(
            (self, next),
            (ImageStatus::Pending, ImageStatus::Analyzing)
                | (ImageStatus::Analyzing, ImageStatus::Done)
                | (ImageStatus::Analyzing, ImageStatus::Error)
        )
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Analyzing => "analyzing",
            ImageStatus::Done => "done",
            ImageStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// One uploaded photo plus its analysis state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopImage {
    /// Unique image identifier (UUID format)
    pub id: String,
    /// Original file name, kept for display
    pub file_name: String,
    /// Declared media type, e.g. `image/png`
    pub mime_type: String,
    /// Raw image bytes
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Base64 encoding of `data`, as sent to the vision model
    pub encoded_data: String,
    /// Analysis text, present once the status is `Done`
    pub description: Option<String>,
    pub status: ImageStatus,
    pub captured_at: DateTime<Utc>,
}

impl WorkshopImage {
    /// Creates a pending image from raw file bytes.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let encoded_data = BASE64_STANDARD.encode(&data);
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
            encoded_data,
            description: None,
            status: ImageStatus::Pending,
            captured_at: Utc::now(),
        }
    }

    /// A `data:` URL suitable for direct display.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.encoded_data)
    }

    /// Moves the image into `Analyzing`.
    pub fn begin_analysis(&mut self) -> Result<()> {
        self.transition(ImageStatus::Analyzing)
    }

    /// Records a successful analysis.
    pub fn complete_analysis(&mut self, description: String) -> Result<()> {
        self.transition(ImageStatus::Done)?;
        self.description = Some(description);
        Ok(())
    }

    /// Records a failed analysis; no detail is retained.
    pub fn fail_analysis(&mut self) -> Result<()> {
        self.transition(ImageStatus::Error)
    }

    /// The description if the analysis finished successfully.
    pub fn completed_description(&self) -> Option<&str> {
        match self.status {
            ImageStatus::Done => self.description.as_deref(),
            _ => None,
        }
    }

    fn transition(&mut self, next: ImageStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(ScribeError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
