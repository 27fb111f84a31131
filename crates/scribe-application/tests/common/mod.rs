//! Scripted generation service shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use scribe_core::error::{Result, ScribeError};
use scribe_core::generation::{GenerativeService, InlineImage, ModelTier, VoiceMap};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Analyze { mime_type: String },
    Text { prompt: String, tier: ModelTier },
    Speech { script: String, voices: Vec<String> },
}

/// Mock service whose replies are scripted per test.
///
/// Image analysis replies and gates are keyed by MIME type. Text replies are
/// consumed from a queue; once the queue is empty every text call succeeds.
#[derive(Default)]
pub struct ScriptedService {
    calls: Mutex<Vec<Call>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    analysis_replies: Mutex<HashMap<String, Result<Option<String>>>>,
    text_replies: Mutex<VecDeque<Result<Option<String>>>>,
    speech_reply: Mutex<Option<Result<Option<String>>>>,
    speech_gate: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Holds analyses of `mime_type` until the returned gate is notified.
    pub fn gate(&self, mime_type: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(mime_type.to_string(), gate.clone());
        gate
    }

    /// Holds speech synthesis until the returned gate is notified.
    pub fn gate_speech(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.speech_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn reply_to_analysis(&self, mime_type: &str, reply: Result<Option<String>>) {
        self.analysis_replies
            .lock()
            .unwrap()
            .insert(mime_type.to_string(), reply);
    }

    pub fn queue_text(&self, reply: Result<Option<String>>) {
        self.text_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_to_speech(&self, reply: Result<Option<String>>) {
        *self.speech_reply.lock().unwrap() = Some(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn text_calls(&self) -> Vec<(String, ModelTier)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { prompt, tier } => Some((prompt, tier)),
                _ => None,
            })
            .collect()
    }

    pub fn speech_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Speech { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GenerativeService for ScriptedService {
    async fn analyze_image(&self, image: InlineImage<'_>, _instruction: &str) -> Result<Option<String>> {
        let mime_type = image.mime_type.to_string();
        self.record(Call::Analyze {
            mime_type: mime_type.clone(),
        });

        let gate = self.gates.lock().unwrap().get(&mime_type).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.analysis_replies
            .lock()
            .unwrap()
            .get(&mime_type)
            .cloned()
            .unwrap_or_else(|| Ok(Some(format!("Description of {}", mime_type))))
    }

    async fn generate_text(&self, prompt: &str, tier: ModelTier) -> Result<Option<String>> {
        self.record(Call::Text {
            prompt: prompt.to_string(),
            tier,
        });
        self.text_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some("# Workshop Report\n\nAll good.".to_string())))
    }

    async fn synthesize_speech(&self, script: &str, voices: &VoiceMap) -> Result<Option<String>> {
        self.record(Call::Speech {
            script: script.to_string(),
            voices: voices.iter().map(|v| v.voice_name.clone()).collect(),
        });

        let gate = self.speech_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.speech_reply
            .lock()
            .unwrap()
            .clone()
            // Four zero bytes: two silent 16-bit frames.
            .unwrap_or_else(|| Ok(Some("AAAAAA==".to_string())))
    }
}

pub fn unavailable() -> ScribeError {
    ScribeError::service(Some(503), "model overloaded", true)
}
