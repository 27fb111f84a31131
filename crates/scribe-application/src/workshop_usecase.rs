//! Workshop use case.
//!
//! `WorkshopUseCase` is the entry point for the presentation layer: session
//! lifecycle, adding and removing photos, report synthesis and the audio
//! overview. Report and audio failures are caught here, the in-progress flags
//! are reset, and the failure is reported both as a `WorkshopEvent` and as
//! the returned error. Nothing partial is ever written to the store.

use crate::analyzer::ImageAnalyzer;
use crate::audio_overview::AudioOverviewGenerator;
use crate::events::{EventSink, WorkshopEvent};
use crate::ingestion::{AnalysisBatch, ImageIngestion};
use crate::report_synthesizer::ReportSynthesizer;
use scribe_core::audio::PcmAudio;
use scribe_core::config::PipelineConfig;
use scribe_core::error::{Result, ScribeError};
use scribe_core::generation::GenerativeService;
use scribe_core::session::{ActiveView, Report, Session, SessionStore, SessionSummary};
use scribe_core::upload::SelectedFile;
use std::sync::Arc;

pub struct WorkshopUseCase {
    store: SessionStore,
    ingestion: ImageIngestion,
    synthesizer: ReportSynthesizer,
    narrator: AudioOverviewGenerator,
    events: EventSink,
}

impl WorkshopUseCase {
    /// Creates a use case over a fresh store with events disabled.
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self::with_parts(
            service,
            SessionStore::new(),
            EventSink::disabled(),
            PipelineConfig::default(),
        )
    }

    pub fn with_parts(
        service: Arc<dyn GenerativeService>,
        store: SessionStore,
        events: EventSink,
        pipeline: PipelineConfig,
    ) -> Self {
        let analyzer = ImageAnalyzer::new(service.clone(), store.clone(), events.clone());
        Self {
            ingestion: ImageIngestion::new(store.clone(), analyzer, events.clone()),
            synthesizer: ReportSynthesizer::new(service.clone()),
            narrator: AudioOverviewGenerator::new(service, pipeline),
            store,
            events,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Creates a new session, lists it first and makes it active.
    pub async fn create_session(&self) -> Session {
        let session = Session::with_default_title();
        self.store.insert_active_session(session.clone()).await;
        tracing::info!("[WorkshopUseCase] Created session {}", session.id);
        session
    }

    pub async fn rename_session(&self, session_id: &str, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.store
            .update_session(session_id, |session| session.title = title)
            .await
            .ok_or_else(|| ScribeError::not_found("Session", session_id))
    }

    /// Deletes a session with its images and report.
    pub async fn delete_session(&self, session_id: &str) -> bool {
        let removed = self.store.delete_session(session_id).await;
        if removed {
            tracing::info!("[WorkshopUseCase] Deleted session {}", session_id);
        }
        removed
    }

    /// Opens a session; shows its report if it has one, otherwise its photos.
    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        self.store.set_active_session(Some(session_id)).await?;
        let has_report = self
            .store
            .session(session_id)
            .await
            .is_some_and(|s| s.report.is_some());
        let view = if has_report {
            ActiveView::Report
        } else {
            ActiveView::Photos
        };
        self.store.set_active_view(view).await;
        Ok(())
    }

    /// Returns to the session list.
    pub async fn close_session(&self) {
        self.store.clear_active_session().await;
    }

    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        self.store.summaries().await
    }

    /// Whether closing now would lose data (every session is memory-only).
    pub async fn has_unsaved_work(&self) -> bool {
        !self.store.is_empty().await
    }

    // ============================================================================
    // Images
    // ============================================================================

    /// Adds image files to a session and starts analysing them.
    pub async fn add_images(&self, session_id: &str, files: Vec<SelectedFile>) -> Result<AnalysisBatch> {
        self.ingestion.ingest(session_id, files).await
    }

    /// Adds image files to the active session.
    pub async fn add_images_to_active(&self, files: Vec<SelectedFile>) -> Result<AnalysisBatch> {
        let session_id = self
            .store
            .active_session_id()
            .await
            .ok_or_else(|| ScribeError::not_found("Session", "<active>"))?;
        self.add_images(&session_id, files).await
    }

    /// Removes an image at any status. Returns whether it was present.
    pub async fn remove_image(&self, session_id: &str, image_id: &str) -> Result<bool> {
        self.store
            .update_session(session_id, |session| session.remove_image(image_id))
            .await
            .ok_or_else(|| ScribeError::not_found("Session", session_id))
    }

    // ============================================================================
    // Report
    // ============================================================================

    /// Synthesizes the session report from its analysed images.
    ///
    /// Refused with `NothingToSynthesize`, without calling the model, when no
    /// image has finished analysis. On success the report replaces any previous
    /// one and the active view switches to it.
    pub async fn generate_report(&self, session_id: &str) -> Result<Report> {
        let descriptions = self
            .store
            .session(session_id)
            .await
            .ok_or_else(|| ScribeError::not_found("Session", session_id))?
            .completed_descriptions();

        if descriptions.is_empty() {
            tracing::info!(
                "[WorkshopUseCase] Report refused for {}: no analysed images",
                session_id
            );
            self.events.emit(WorkshopEvent::ReportFailed {
                session_id: session_id.to_string(),
                message: ScribeError::NothingToSynthesize.to_string(),
            });
            return Err(ScribeError::NothingToSynthesize);
        }

        self.store
            .update_session(session_id, |session| session.report_in_progress = true)
            .await;
        self.events.emit(WorkshopEvent::ReportStarted {
            session_id: session_id.to_string(),
        });

        match self.synthesizer.synthesize(&descriptions).await {
            Ok(synthesized) => {
                let report = Report::new(synthesized.markdown);
                let stored = report.clone();
                let applied = self
                    .store
                    .update_session(session_id, |session| {
                        session.set_report(stored);
                        session.report_in_progress = false;
                    })
                    .await;
                if applied.is_none() {
                    tracing::debug!(
                        "[WorkshopUseCase] Session {} deleted during synthesis",
                        session_id
                    );
                    return Err(ScribeError::not_found("Session", session_id));
                }
                self.store
                    .set_active_view_for(session_id, ActiveView::Report)
                    .await;
                self.events.emit(WorkshopEvent::ReportReady {
                    session_id: session_id.to_string(),
                    tier: synthesized.tier,
                });
                Ok(report)
            }
            Err(e) => {
                self.store
                    .update_session(session_id, |session| session.report_in_progress = false)
                    .await;
                self.events.emit(WorkshopEvent::ReportFailed {
                    session_id: session_id.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    // ============================================================================
    // Audio overview
    // ============================================================================

    /// Generates the audio overview for the session's current report.
    pub async fn generate_audio(&self, session_id: &str) -> Result<PcmAudio> {
        let report = self
            .store
            .session(session_id)
            .await
            .ok_or_else(|| ScribeError::not_found("Session", session_id))?
            .report
            .ok_or_else(|| ScribeError::MissingReport(session_id.to_string()))?;

        self.store
            .update_session(session_id, |session| session.audio_in_progress = true)
            .await;
        self.events.emit(WorkshopEvent::AudioStarted {
            session_id: session_id.to_string(),
        });

        let outcome = match self.narrator.narrate(&report.markdown).await {
            Ok(audio) => {
                let attached = audio.clone();
                let applied = self
                    .store
                    .update_session(session_id, |session| {
                        session.audio_in_progress = false;
                        session.attach_audio(&report.id, attached)
                    })
                    .await;
                match applied {
                    Some(Ok(true)) => Ok(audio),
                    Some(Ok(false)) => Err(ScribeError::internal(
                        "report was regenerated while the audio overview was produced",
                    )),
                    Some(Err(e)) => Err(e),
                    None => Err(ScribeError::not_found("Session", session_id)),
                }
            }
            Err(e) => {
                self.store
                    .update_session(session_id, |session| session.audio_in_progress = false)
                    .await;
                Err(e)
            }
        };

        match &outcome {
            Ok(audio) => self.events.emit(WorkshopEvent::AudioReady {
                session_id: session_id.to_string(),
                duration_secs: audio.duration().as_secs_f64(),
            }),
            Err(e) => {
                tracing::warn!("[WorkshopUseCase] Audio overview failed for {}: {}", session_id, e);
                self.events.emit(WorkshopEvent::AudioFailed {
                    session_id: session_id.to_string(),
                    message: e.to_string(),
                });
            }
        }
        outcome
    }
}
