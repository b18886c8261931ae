//! OpenAI Whisper transcription provider
//!
//! Requests `response_format=text`, so a successful response body is the
//! transcript itself rather than JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, multipart::Form};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::file_part;
use crate::config::OpenAiSpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::AudioFile;

/// OpenAI speech-to-text provider
#[derive(Debug, Clone)]
pub struct OpenAiWhisperProvider {
    client: Client,
    config: OpenAiSpeechConfig,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiWhisperProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: OpenAiSpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, SpeechError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SpeechError::Configuration(
                    "OpenAI API key is not configured (set OPENAI_API_KEY)".to_string(),
                )
            })
    }

    fn stt_url(&self) -> String {
        format!(
            "{}/audio/transcriptions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> SpeechError {
        if err.is_timeout() {
            SpeechError::Timeout(self.config.timeout_ms)
        } else {
            err.into()
        }
    }

    async fn rejection(response: Response) -> SpeechError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiError>(&body).map_or_else(
            |_| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.clone()
                }
            },
            |e| e.error.message,
        );
        SpeechError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl SpeechToText for OpenAiWhisperProvider {
    #[instrument(skip(self, audio), fields(filename = %audio.filename, content_type = %audio.content_type))]
    async fn transcribe_file(&self, audio: &AudioFile) -> Result<String, SpeechError> {
        let api_key = self.api_key()?;
        debug!("Transcribing audio with OpenAI Whisper");

        let form = Form::new()
            .part("file", file_part(audio).await?)
            .text("model", self.config.model.clone())
            .text("response_format", "text");

        let response = self
            .client
            .post(self.stt_url())
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let err = Self::rejection(response).await;
            warn!(error = %err, "OpenAI rejected transcription");
            return Err(err);
        }

        let text = response
            .text()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read response: {e}")))?;
        let text = text.trim_end().to_string();

        debug!(text_len = text.len(), "Transcription complete");
        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn create_test_provider(mock_server: &MockServer) -> OpenAiWhisperProvider {
        let config = OpenAiSpeechConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: mock_server.uri(),
            ..Default::default()
        };
        OpenAiWhisperProvider::new(config).unwrap()
    }

    fn audio_file() -> (tempfile::NamedTempFile, AudioFile) {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(b"ID3\x03\x00fake-mp3").unwrap();
        let audio = AudioFile::new(file.path(), "clip.mp3", "audio/mpeg");
        (file, audio)
    }

    #[tokio::test]
    async fn transcribe_returns_plain_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_string_contains("whisper-1"))
            .and(body_string_contains("name=\"response_format\""))
            .and(body_string_contains("filename=\"clip.mp3\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello world\n"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let (_guard, audio) = audio_file();

        let text = provider.transcribe_file(&audio).await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn api_error_message_is_passed_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "message": "Invalid file format. Supported formats: ['flac', 'mp3']",
                    "type": "invalid_request_error",
                    "code": null
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let (_guard, audio) = audio_file();

        let err = provider.transcribe_file(&audio).await.unwrap_err();
        assert!(matches!(err, SpeechError::Rejected { status: 400, .. }));
        assert_eq!(
            err.to_string(),
            "Invalid file format. Supported formats: ['flac', 'mp3']"
        );
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let (_guard, audio) = audio_file();

        let err = provider.transcribe_file(&audio).await.unwrap_err();
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenAiWhisperProvider::new(OpenAiSpeechConfig {
            base_url: mock_server.uri(),
            ..Default::default()
        })
        .unwrap();
        let (_guard, audio) = audio_file();

        assert!(!provider.is_configured());
        let err = provider.transcribe_file(&audio).await.unwrap_err();
        assert!(matches!(err, SpeechError::Configuration(_)));
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn missing_file_is_audio_error() {
        let mock_server = MockServer::start().await;
        let provider = create_test_provider(&mock_server);
        let audio = AudioFile::new("/nonexistent/clip.mp3", "clip.mp3", "audio/mpeg");

        let err = provider.transcribe_file(&audio).await.unwrap_err();
        assert!(matches!(err, SpeechError::AudioFile(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenAiWhisperProvider::new(OpenAiSpeechConfig {
            api_key: Some("k".to_string()),
            base_url: mock_server.uri(),
            timeout_ms: 50,
            ..Default::default()
        })
        .unwrap();
        let (_guard, audio) = audio_file();

        let err = provider.transcribe_file(&audio).await.unwrap_err();
        assert!(matches!(err, SpeechError::Timeout(50)));
    }

    #[test]
    fn model_name_comes_from_config() {
        let provider = OpenAiWhisperProvider::new(OpenAiSpeechConfig::default()).unwrap();
        assert_eq!(provider.model_name(), "whisper-1");
    }
}
