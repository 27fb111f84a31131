//! Per-image analysis.
//!
//! Each image is analysed by its own task. A task moves its image to
//! `Analyzing` before calling the vision model, then records `Done` or `Error`
//! on that image only. Tasks are not ordered relative to each other and an
//! image removed in the meantime simply swallows the late result.

use crate::events::{EventSink, WorkshopEvent};
use crate::prompts::{IMAGE_ANALYSIS_INSTRUCTION, NO_ANALYSIS_PLACEHOLDER};
use scribe_core::generation::{GenerativeService, InlineImage};
use scribe_core::session::{ImageStatus, SessionStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs vision analysis for images in the store.
#[derive(Clone)]
pub struct ImageAnalyzer {
    service: Arc<dyn GenerativeService>,
    store: SessionStore,
    events: EventSink,
}

impl ImageAnalyzer {
    pub fn new(service: Arc<dyn GenerativeService>, store: SessionStore, events: EventSink) -> Self {
        Self {
            service,
            store,
            events,
        }
    }

    /// Starts analysis of one image on its own task without waiting for it.
    pub fn spawn(&self, session_id: String, image_id: String) -> JoinHandle<Option<ImageStatus>> {
        let analyzer = self.clone();
        tokio::spawn(async move { analyzer.analyze(&session_id, &image_id).await })
    }

    /// Analyses one image and records the outcome on it.
    ///
    /// Returns the image's final status, or `None` if the image (or its
    /// session) no longer exists or was not pending.
    pub async fn analyze(&self, session_id: &str, image_id: &str) -> Option<ImageStatus> {
        let prepared = self
            .store
            .update_image(session_id, image_id, |image| {
                image
                    .begin_analysis()
                    .map(|_| (image.mime_type.clone(), image.encoded_data.clone()))
            })
            .await;

        let (mime_type, encoded_data) = match prepared {
            Some(Ok(payload)) => payload,
            Some(Err(e)) => {
                tracing::warn!(
                    "[Analyzer] Image {} not started: {}",
                    image_id,
                    e
                );
                return None;
            }
            None => return None,
        };
        self.notify(session_id, image_id, ImageStatus::Analyzing);
        tracing::debug!("[Analyzer] Analyzing image {} ({})", image_id, mime_type);

        let result = self
            .service
            .analyze_image(
                InlineImage {
                    mime_type: &mime_type,
                    base64_data: &encoded_data,
                },
                IMAGE_ANALYSIS_INSTRUCTION,
            )
            .await;

        let description = match result {
            Ok(Some(text)) => Some(text),
            Ok(None) => Some(NO_ANALYSIS_PLACEHOLDER.to_string()),
            Err(e) => {
                tracing::warn!("[Analyzer] Analysis failed for image {}: {}", image_id, e);
                None
            }
        };

        let recorded = self
            .store
            .update_image(session_id, image_id, |image| {
                match description {
                    Some(text) => image.complete_analysis(text)?,
                    None => image.fail_analysis()?,
                }
                Ok::<_, scribe_core::ScribeError>(image.status)
            })
            .await;

        match recorded {
            Some(Ok(status)) => {
                tracing::info!("[Analyzer] Image {} -> {}", image_id, status);
                self.notify(session_id, image_id, status);
                Some(status)
            }
            Some(Err(e)) => {
                tracing::error!("[Analyzer] Could not record result for {}: {}", image_id, e);
                None
            }
            None => {
                tracing::debug!(
                    "[Analyzer] Discarding result for removed image {}",
                    image_id
                );
                None
            }
        }
    }

    fn notify(&self, session_id: &str, image_id: &str, status: ImageStatus) {
        self.events.emit(WorkshopEvent::ImageStatusChanged {
            session_id: session_id.to_string(),
            image_id: image_id.to_string(),
            status,
        });
    }
}
