//! GeminiApiClient - Direct REST API implementation of the generation service.
//!
//! Vision analysis, tiered text generation and multi-speaker speech synthesis
//! all go through the `generateContent` endpoint with different models and
//! generation configs.

use reqwest::{Client, StatusCode};
use scribe_core::config::ModelConfig;
use scribe_core::error::{Result, ScribeError};
use scribe_core::generation::{GenerativeService, InlineImage, ModelTier, VoiceMap};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    models: ModelConfig,
    base_url: String,
}

impl GeminiApiClient {
    /// Creates a client with the default model set.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            models: ModelConfig::default(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the model identifiers.
    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    /// Points the client at a different API root (e.g. a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    fn model_for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Reasoning => &self.models.reasoning,
            ModelTier::Fast => &self.models.fast,
        }
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/{model}:generateContent", self.base_url);
        tracing::debug!("[GeminiApiClient] POST {}", url);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let retryable = err.is_connect() || err.is_timeout();
                ScribeError::service(
                    None,
                    format!("Gemini API request failed: {}", err.without_url()),
                    retryable,
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response.json().await.map_err(|err| {
            ScribeError::service(
                None,
                format!("Failed to parse Gemini response: {}", err.without_url()),
                false,
            )
        })
    }
}

#[async_trait::async_trait]
impl GenerativeService for GeminiApiClient {
    async fn analyze_image(
        &self,
        image: InlineImage<'_>,
        instruction: &str,
    ) -> Result<Option<String>> {
        let request = GenerateContentRequest::user(vec![
            Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type.to_string(),
                    data: image.base64_data.to_string(),
                },
            },
            Part::Text {
                text: instruction.to_string(),
            },
        ]);
        let response = self.send_request(&self.models.vision, &request).await?;
        Ok(extract_text(response))
    }

    async fn generate_text(&self, prompt: &str, tier: ModelTier) -> Result<Option<String>> {
        let request = GenerateContentRequest::user(vec![Part::Text {
            text: prompt.to_string(),
        }]);
        let response = self.send_request(self.model_for_tier(tier), &request).await?;
        Ok(extract_text(response))
    }

    async fn synthesize_speech(&self, script: &str, voices: &VoiceMap) -> Result<Option<String>> {
        let mut request = GenerateContentRequest::user(vec![Part::Text {
            text: script.to_string(),
        }]);
        request.generation_config = Some(GenerationConfig::multi_speaker_audio(voices));
        let response = self.send_request(&self.models.speech, &request).await?;
        Ok(extract_audio(response))
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: None,
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

impl GenerationConfig {
    fn multi_speaker_audio(voices: &VoiceMap) -> Self {
        Self {
            response_modalities: vec!["AUDIO".to_string()],
            speech_config: SpeechConfig {
                multi_speaker_voice_config: MultiSpeakerVoiceConfig {
                    speaker_voice_configs: voices
                        .iter()
                        .map(|voice| SpeakerVoiceConfig {
                            speaker: voice.speaker.clone(),
                            voice_config: VoiceConfig {
                                prebuilt_voice_config: PrebuiltVoiceConfig {
                                    voice_name: voice.voice_name.clone(),
                                },
                            },
                        })
                        .collect(),
                },
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    multi_speaker_voice_config: MultiSpeakerVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSpeakerVoiceConfig {
    speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakerVoiceConfig {
    speaker: String,
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineDataPayload>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn first_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

/// Concatenates the text parts of the first candidate; `None` when blank.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = first_parts(response)
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Returns the base64 payload of the first inline-data part.
fn extract_audio(response: GenerateContentResponse) -> Option<String> {
    first_parts(response)
        .into_iter()
        .find_map(|part| part.inline_data)
        .map(|inline| inline.data)
        .filter(|data| !data.is_empty())
}

fn map_http_error(status: StatusCode, body: String) -> ScribeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ScribeError::service(Some(status.as_u16()), message, retryable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::speaker::{default_speakers, voice_map};
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_vision_request_puts_image_before_instruction() {
        let request = GenerateContentRequest::user(vec![
            Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: "image/png".to_string(),
                    data: "AQID".to_string(),
                },
            },
            Part::Text {
                text: "Describe".to_string(),
            },
        ]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "AQID"}},
                        {"text": "Describe"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_speech_request_maps_each_speaker_to_voice() {
        let config = GenerationConfig::multi_speaker_audio(&voice_map(&default_speakers()));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["responseModalities"], json!(["AUDIO"]));
        assert_eq!(
            value["speechConfig"]["multiSpeakerVoiceConfig"]["speakerVoiceConfigs"],
            json!([
                {"speaker": "Alex", "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Fenrir"}}},
                {"speaker": "Sam", "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Puck"}}}
            ])
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}]
        }));
        assert_eq!(extract_text(response).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_extract_text_blank_is_none() {
        assert!(extract_text(parse(json!({"candidates": []}))).is_none());
        assert!(extract_text(parse(json!({}))).is_none());
        let blank = parse(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]}));
        assert!(extract_text(blank).is_none());
    }

    #[test]
    fn test_extract_audio_reads_inline_data() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAAA"}}
            ]}}]
        }));
        assert_eq!(extract_audio(response).as_deref(), Some("AAAA"));
        let text_only = parse(json!({"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}));
        assert!(extract_audio(text_only).is_none());
    }

    #[test]
    fn test_map_http_error_uses_api_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        match err {
            ScribeError::Service {
                status_code,
                message,
                retryable,
            } => {
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
                assert!(retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_REQUEST, "bad".to_string());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_tier_selects_model() {
        let client = GeminiApiClient::new("key");
        assert_eq!(client.model_for_tier(ModelTier::Reasoning), "gemini-3-pro-preview");
        assert_eq!(client.model_for_tier(ModelTier::Fast), "gemini-2.5-flash");
    }

    // ============================================================================
    // HTTP round trips against a local listener
    // ============================================================================

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one HTTP response and returns the raw request it received.
    async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_lowercase();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn local_client(base_url: String) -> GeminiApiClient {
        let mut client = GeminiApiClient::new("secret-key").with_base_url(base_url);
        // Keep loopback requests away from any proxy in the environment.
        client.client = Client::builder().no_proxy().build().unwrap();
        client
    }

    #[tokio::test]
    async fn test_request_sends_key_in_header_and_targets_tier_model() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": "# Report"}]}}]});
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", body.to_string()).await;
        let client = local_client(base_url);

        let text = client
            .generate_text("Summarize", ModelTier::Reasoning)
            .await
            .unwrap();

        assert_eq!(text.as_deref(), Some("# Report"));
        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert_eq!(
            request_line,
            "POST /gemini-3-pro-preview:generateContent HTTP/1.1"
        );
        assert!(!request_line.contains("secret-key"));
        assert!(request.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains("\"text\":\"Summarize\""));
    }

    #[tokio::test]
    async fn test_unavailable_status_maps_to_retryable_error() {
        let body = json!({"error": {"code": 503, "message": "overloaded", "status": "UNAVAILABLE"}});
        let (base_url, server) =
            serve_once("HTTP/1.1 503 Service Unavailable", body.to_string()).await;
        let client = local_client(base_url);

        let err = client
            .generate_text("Summarize", ModelTier::Fast)
            .await
            .unwrap_err();

        server.await.unwrap();
        match err {
            ScribeError::Service {
                status_code,
                message,
                retryable,
            } => {
                assert_eq!(status_code, Some(503));
                assert_eq!(message, "UNAVAILABLE: overloaded");
                assert!(retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_speech_request_returns_audio_payload() {
        let body = json!({"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAAA"}}
        ]}}]});
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", body.to_string()).await;
        let client = local_client(base_url);

        let audio = client
            .synthesize_speech("Alex: Hi.", &voice_map(&default_speakers()))
            .await
            .unwrap();

        assert_eq!(audio.as_deref(), Some("AAAA"));
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /gemini-2.5-flash-preview-tts:generateContent"));
        assert!(request.contains("\"responseModalities\":[\"AUDIO\"]"));
    }
}
