//! Application layer for Scribe.
//!
//! Use cases that coordinate the session store with the generation service:
//! ingestion, per-image analysis, report synthesis and the audio overview.

pub mod analyzer;
pub mod audio_overview;
pub mod events;
pub mod ingestion;
pub mod prompts;
pub mod report_synthesizer;
pub mod workshop_usecase;

pub use analyzer::ImageAnalyzer;
pub use audio_overview::AudioOverviewGenerator;
pub use events::{EventSink, WorkshopEvent, event_channel};
pub use ingestion::{AnalysisBatch, ImageIngestion};
pub use report_synthesizer::{ReportSynthesizer, SynthesizedReport};
pub use workshop_usecase::WorkshopUseCase;
