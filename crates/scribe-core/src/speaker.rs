//! Podcast speaker personas.
//!
//! The audio overview is a dialogue between two fixed hosts. The same
//! definitions feed the script prompt and the speech-synthesis voice map, so
//! the names in the generated script always line up with a configured voice.

use crate::generation::{SpeakerVoice, VoiceMap};
use serde::{Deserialize, Serialize};

/// A host in the audio overview.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    /// Name used as the line prefix in the script
    pub name: String,
    /// Role description given to the script writer
    pub role: String,
    /// Voice and personality notes given to the script writer
    pub style: String,
    /// Prebuilt TTS voice this speaker is rendered with
    pub voice_name: String,
}

/// Returns the two default hosts: Alex (lead) and Sam (analyst).
pub fn default_speakers() -> Vec<Speaker> {
    vec![
        Speaker {
            name: "Alex".to_string(),
            role: "The lead facilitator".to_string(),
            style: "Deep voice, confident, summarizing the big picture.".to_string(),
            voice_name: "Fenrir".to_string(),
        },
        Speaker {
            name: "Sam".to_string(),
            role: "The analyst".to_string(),
            style: "Higher voice, curious, asking questions and pointing out specific sticky note details.".to_string(),
            voice_name: "Puck".to_string(),
        },
    ]
}

/// Builds the TTS voice map for the given speakers.
pub fn voice_map(speakers: &[Speaker]) -> VoiceMap {
    speakers
        .iter()
        .map(|speaker| SpeakerVoice {
            speaker: speaker.name.clone(),
            voice_name: speaker.voice_name.clone(),
        })
        .collect()
}

/// One line of a dialogue script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub speaker: String,
    pub line: String,
}

/// Splits a `Speaker: line` script into lines.
///
/// Lines without a `:` separator, or with an empty speaker or text, are skipped.
pub fn parse_script(script: &str) -> Vec<ScriptLine> {
    script
        .lines()
        .filter_map(|raw| {
            let (speaker, line) = raw.split_once(':')?;
            let speaker = speaker.trim();
            let line = line.trim();
            if speaker.is_empty() || line.is_empty() {
                return None;
            }
            Some(ScriptLine {
                speaker: speaker.to_string(),
                line: line.to_string(),
            })
        })
        .collect()
}
