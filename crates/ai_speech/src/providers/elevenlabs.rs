//! ElevenLabs voice cloning and text-to-speech provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::ACCEPT, multipart::Form};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::file_part;
use crate::config::ElevenLabsConfig;
use crate::error::SpeechError;
use crate::ports::VoiceCloning;
use crate::types::{AudioFile, VoiceInfo, VoiceSettings};

const API_KEY_HEADER: &str = "xi-api-key";

/// ElevenLabs provider
#[derive(Debug, Clone)]
pub struct ElevenLabsProvider {
    client: Client,
    config: ElevenLabsConfig,
}

#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceInfo>,
}

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// Error bodies come as `{"detail": {"message": ..}}` or `{"detail": ".."}`
#[derive(Debug, Deserialize)]
struct ApiError {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorDetail {
    Structured { message: String },
    Plain(String),
}

impl ElevenLabsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    pub fn default_voice_id(&self) -> &str {
        &self.config.default_voice_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, SpeechError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SpeechError::Configuration(
                    "ElevenLabs API key is not configured (set ELEVENLABS_API_KEY)".to_string(),
                )
            })?;
        Ok(request.header(API_KEY_HEADER, api_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SpeechError> {
        let response = self
            .authorized(request)?
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout(self.config.timeout_ms)
                } else {
                    e.into()
                }
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let err = Self::rejection(response).await;
            warn!(error = %err, "ElevenLabs rejected request");
            Err(err)
        }
    }

    async fn rejection(response: Response) -> SpeechError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ApiError>(&body) {
            Ok(ApiError {
                detail: ApiErrorDetail::Structured { message } | ApiErrorDetail::Plain(message),
            }) => message,
            Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
            Err(_) => body,
        };
        SpeechError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl VoiceCloning for ElevenLabsProvider {
    #[instrument(skip(self, description, sample), fields(filename = %sample.filename))]
    async fn add_voice(
        &self,
        name: &str,
        description: &str,
        sample: &AudioFile,
    ) -> Result<String, SpeechError> {
        let form = Form::new()
            .text("name", name.to_string())
            .text("description", description.to_string())
            .part("files", file_part(sample).await?);

        let response = self
            .send(self.client.post(self.url("/voices/add")).multipart(form))
            .await?;
        let body: AddVoiceResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        debug!(voice_id = %body.voice_id, "Voice added");
        Ok(body.voice_id)
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn text_to_speech(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, SpeechError> {
        let request = TtsRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/text-to-speech/{voice_id}")))
                    .header(ACCEPT, "audio/mpeg")
                    .json(&request),
            )
            .await?;
        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");
        Ok(audio.to_vec())
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let response = self.send(self.client.get(self.url("/voices"))).await?;
        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse voices: {e}")))?;
        Ok(body.voices)
    }

    #[instrument(skip(self))]
    async fn delete_voice(&self, voice_id: &str) -> Result<(), SpeechError> {
        self.send(self.client.delete(self.url(&format!("/voices/{voice_id}"))))
            .await?;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn create_test_provider(mock_server: &MockServer) -> ElevenLabsProvider {
        ElevenLabsProvider::new(ElevenLabsConfig {
            api_key: Some("xi-test".to_string()),
            base_url: mock_server.uri(),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample() -> (tempfile::NamedTempFile, AudioFile) {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF----WAVEfmt ").unwrap();
        let audio = AudioFile::new(file.path(), "me.wav", "audio/wav");
        (file, audio)
    }

    #[tokio::test]
    async fn add_voice_posts_sample() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/voices/add"))
            .and(header("xi-api-key", "xi-test"))
            .and(body_string_contains("voice_clone_deadbeef"))
            .and(body_string_contains("name=\"files\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"voice_id": "v-1"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let (_guard, audio) = sample();
        let id = provider
            .add_voice("voice_clone_deadbeef", "test", &audio)
            .await
            .unwrap();
        assert_eq!(id, "v-1");
    }

    #[tokio::test]
    async fn text_to_speech_sends_model_and_settings() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/v-1"))
            .and(header("accept", "audio/mpeg"))
            .and(body_json(serde_json::json!({
                "text": "Hello",
                "model_id": "eleven_monolingual_v1",
                "voice_settings": {"stability": 0.5, "similarity_boost": 0.5}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let audio = provider.text_to_speech("v-1", "Hello").await.unwrap();
        assert_eq!(audio, b"ID3audio");
    }

    #[tokio::test]
    async fn structured_error_detail_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/voices/add"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": {"status": "invalid_sample", "message": "Sample is too short"}
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let (_guard, audio) = sample();
        let err = provider.add_voice("n", "d", &audio).await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Sample is too short");
    }

    #[tokio::test]
    async fn plain_error_detail_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/voices/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Voice not found"})),
            )
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let err = provider.delete_voice("missing").await.unwrap_err();
        assert!(matches!(err, SpeechError::Rejected { status: 404, .. }));
        assert_eq!(err.to_string(), "Voice not found");
    }

    #[tokio::test]
    async fn list_voices_parses_library() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/voices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "voices": [
                    {"voice_id": "a", "name": "Rachel", "category": "premade"},
                    {"voice_id": "b", "name": "Mine", "category": "cloned", "preview_url": "https://x/p.mp3"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let voices = provider.list_voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].preview_url.as_deref(), Some("https://x/p.mp3"));
    }

    #[tokio::test]
    async fn delete_voice_succeeds() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/voices/v-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        provider.delete_voice("v-9").await.unwrap();
    }

    #[tokio::test]
    async fn missing_key_is_configuration_error() {
        let mock_server = MockServer::start().await;
        let provider = ElevenLabsProvider::new(ElevenLabsConfig {
            base_url: mock_server.uri(),
            ..Default::default()
        })
        .unwrap();

        assert!(!provider.is_configured());
        let err = provider.list_voices().await.unwrap_err();
        assert!(matches!(err, SpeechError::Configuration(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let provider = ElevenLabsProvider::new(ElevenLabsConfig {
            api_key: Some("k".to_string()),
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        })
        .unwrap();

        let err = provider.list_voices().await.unwrap_err();
        assert!(!err.is_rejection());
    }
}
