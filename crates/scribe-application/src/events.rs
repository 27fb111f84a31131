//! Workshop events for the presentation layer.
//!
//! Every user-facing notification (an image finishing, a report failing, audio
//! becoming available) is emitted as a [`WorkshopEvent`] on an unbounded tokio
//! channel. Sending never blocks and a dropped receiver is ignored.

use scribe_core::generation::ModelTier;
use scribe_core::session::ImageStatus;
use serde::Serialize;
use tokio::sync::mpsc;

/// Event emitted by the workshop use cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkshopEvent {
    ImagesAdded {
        session_id: String,
        image_ids: Vec<String>,
        skipped: usize,
    },
    ImageStatusChanged {
        session_id: String,
        image_id: String,
        status: ImageStatus,
    },
    ReportStarted {
        session_id: String,
    },
    ReportReady {
        session_id: String,
        tier: ModelTier,
    },
    ReportFailed {
        session_id: String,
        message: String,
    },
    AudioStarted {
        session_id: String,
    },
    AudioReady {
        session_id: String,
        duration_secs: f64,
    },
    AudioFailed {
        session_id: String,
        message: String,
    },
}

/// Sending half of the event channel; a disabled sink drops everything.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<WorkshopEvent>>,
}

impl EventSink {
    pub fn new(sender: mpsc::UnboundedSender<WorkshopEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A sink that discards events.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: WorkshopEvent) {
        if let Some(sender) = &self.sender {
            // Non-blocking send - if the receiver is dropped, we just skip
            let _ = sender.send(event);
        }
    }
}

/// Creates a connected sink and receiver.
pub fn event_channel() -> (EventSink, mpsc::UnboundedReceiver<WorkshopEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (EventSink::new(sender), receiver)
}
