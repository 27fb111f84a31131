//! Image ingestion.
//!
//! Turns user-selected files into pending images, appends them to a session in
//! selection order and starts one independent analysis per new image.

use crate::analyzer::ImageAnalyzer;
use crate::events::{EventSink, WorkshopEvent};
use futures::future::join_all;
use scribe_core::error::{Result, ScribeError};
use scribe_core::session::{ImageStatus, SessionStore, WorkshopImage};
use scribe_core::upload::SelectedFile;
use tokio::task::JoinHandle;

/// Images added by one ingestion and their in-flight analyses.
///
/// Dropping the batch does not cancel anything; the analyses keep running.
pub struct AnalysisBatch {
    pub session_id: String,
    /// New image ids, in selection order
    pub image_ids: Vec<String>,
    /// Number of selected files that were not images
    pub skipped: usize,
    handles: Vec<JoinHandle<Option<ImageStatus>>>,
}

impl AnalysisBatch {
    /// Waits for every analysis in the batch.
    ///
    /// Returns `(image_id, final status)` pairs in selection order; the status
    /// is `None` for images removed before their analysis finished.
    pub async fn wait(self) -> Vec<(String, Option<ImageStatus>)> {
        let results = join_all(self.handles).await;
        self.image_ids
            .into_iter()
            .zip(results)
            .map(|(id, joined)| (id, joined.ok().flatten()))
            .collect()
    }
}

/// Splits selected files into pending images and a count of skipped files.
pub fn prepare_images(files: Vec<SelectedFile>) -> (Vec<WorkshopImage>, usize) {
    let total = files.len();
    let images: Vec<WorkshopImage> = files
        .into_iter()
        .filter(SelectedFile::is_image)
        .map(|file| WorkshopImage::new(file.name, file.mime_type, file.data))
        .collect();
    let skipped = total - images.len();
    (images, skipped)
}

pub struct ImageIngestion {
    store: SessionStore,
    analyzer: ImageAnalyzer,
    events: EventSink,
}

impl ImageIngestion {
    pub fn new(store: SessionStore, analyzer: ImageAnalyzer, events: EventSink) -> Self {
        Self {
            store,
            analyzer,
            events,
        }
    }

    /// Adds the image files to a session and starts their analyses.
    ///
    /// Non-image files are skipped without error.
    pub async fn ingest(&self, session_id: &str, files: Vec<SelectedFile>) -> Result<AnalysisBatch> {
        let (images, skipped) = prepare_images(files);
        let image_ids: Vec<String> = images.iter().map(|image| image.id.clone()).collect();

        self.store
            .update_session(session_id, |session| session.append_images(images))
            .await
            .ok_or_else(|| ScribeError::not_found("Session", session_id))?;

        tracing::info!(
            "[Ingestion] Added {} image(s) to session {} (skipped {})",
            image_ids.len(),
            session_id,
            skipped
        );
        self.events.emit(WorkshopEvent::ImagesAdded {
            session_id: session_id.to_string(),
            image_ids: image_ids.clone(),
            skipped,
        });

        let handles = image_ids
            .iter()
            .map(|image_id| self.analyzer.spawn(session_id.to_string(), image_id.clone()))
            .collect();

        Ok(AnalysisBatch {
            session_id: session_id.to_string(),
            image_ids,
            skipped,
            handles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_images_filters_and_keeps_order() {
        let files = vec![
            SelectedFile::new("a.png", "image/png", vec![1]),
            SelectedFile::new("notes.pdf", "application/pdf", vec![2]),
            SelectedFile::new("b.jpg", "image/jpeg", vec![3]),
        ];

        let (images, skipped) = prepare_images(files);

        assert_eq!(skipped, 1);
        let names: Vec<&str> = images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
        assert!(images.iter().all(|i| i.status == ImageStatus::Pending));
        assert_ne!(images[0].id, images[1].id);
    }
}
