//! Raw PCM audio returned by the speech model.
//!
//! The service returns single-channel, 16-bit signed little-endian samples at
//! 24 kHz, base64-encoded. `PcmAudio` keeps the exact decoded bytes so the
//! payload can be re-encoded without loss, and offers the sample views a
//! playback device or file exporter needs.

use crate::error::{Result, ScribeError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

const BYTES_PER_SAMPLE: usize = 2;
const BITS_PER_SAMPLE: u16 = 16;
const SAMPLE_SCALE: f32 = 32768.0;
const WAV_HEADER_LEN: usize = 44;

/// Most channels a payload may declare.
pub const MAX_CHANNELS: u16 = 8;
/// Largest payload that still fits a RIFF size field.
pub const MAX_DATA_LEN: usize = u32::MAX as usize - (WAV_HEADER_LEN - 8);

/// Decoded linear PCM audio.
///
/// Deserialization goes through [`PcmAudio::from_bytes`], so every value
/// holds whole frames of a positive channel count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPcmAudio")]
pub struct PcmAudio {
    #[serde(serialize_with = "serialize_base64")]
    data: Vec<u8>,
    sample_rate: u32,
    channels: u16,
}

/// Unchecked wire form of [`PcmAudio`].
#[derive(Deserialize)]
struct RawPcmAudio {
    #[serde(deserialize_with = "deserialize_base64")]
    data: Vec<u8>,
    sample_rate: u32,
    channels: u16,
}

impl TryFrom<RawPcmAudio> for PcmAudio {
    type Error = ScribeError;

    fn try_from(raw: RawPcmAudio) -> Result<Self> {
        PcmAudio::from_bytes(raw.data, raw.sample_rate, raw.channels)
    }
}

impl PcmAudio {
    /// Wraps raw little-endian 16-bit PCM bytes.
    pub fn from_bytes(data: Vec<u8>, sample_rate: u32, channels: u16) -> Result<Self> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(ScribeError::Decode(format!(
                "channel count {} is outside 1..={}",
                channels, MAX_CHANNELS
            )));
        }
        if data.len() > MAX_DATA_LEN {
            return Err(ScribeError::Decode(format!(
                "PCM payload of {} bytes exceeds the {} byte limit",
                data.len(),
                MAX_DATA_LEN
            )));
        }
        let frame_size = BYTES_PER_SAMPLE * channels as usize;
        if data.len() % frame_size != 0 {
            return Err(ScribeError::Decode(format!(
                "PCM payload of {} bytes is not a whole number of {}-byte frames",
                data.len(),
                frame_size
            )));
        }
        Ok(Self {
            data,
            sample_rate,
            channels,
        })
    }

    /// Decodes a base64 PCM payload as delivered by the speech model.
    pub fn from_base64(encoded: &str, sample_rate: u32, channels: u16) -> Result<Self> {
        let data = BASE64_STANDARD.decode(encoded.trim())?;
        Self::from_bytes(data, sample_rate, channels)
    }

    /// Re-encodes the payload; yields the same bytes `from_base64` received.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved signed samples.
    pub fn samples(&self) -> Vec<i16> {
        self.data
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// Samples scaled into `[-1.0, 1.0)` for a floating-point audio buffer.
    pub fn normalized_samples(&self) -> Vec<f32> {
        self.samples()
            .into_iter()
            .map(|sample| f32::from(sample) / SAMPLE_SCALE)
            .collect()
    }

    /// Number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.data.len() / (BYTES_PER_SAMPLE * self.channels as usize)
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.sample_rate))
    }

    /// Wraps the samples in a RIFF/WAVE container.
    pub fn to_wav(&self) -> Vec<u8> {
        // Both bounded by the checks in `from_bytes`.
        let data_len = u32::try_from(self.data.len()).unwrap_or(u32::MAX);
        let riff_len = data_len.saturating_add((WAV_HEADER_LEN - 8) as u32);
        let block_align = self.channels * (BITS_PER_SAMPLE / 8);
        let byte_rate = self.sample_rate.saturating_mul(u32::from(block_align));

        let mut wav = Vec::with_capacity(WAV_HEADER_LEN + self.data.len());
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&riff_len.to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&self.channels.to_le_bytes());
        wav.extend_from_slice(&self.sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.extend_from_slice(&self.data);
        wav
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(data))
}

fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64_STANDARD
        .decode(encoded)
        .map_err(serde::de::Error::custom)
}
