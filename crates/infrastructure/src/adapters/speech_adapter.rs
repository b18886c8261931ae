//! Speech adapter - Implements TranscriptionPort using the ai_speech crate

use std::sync::Arc;

use ai_speech::{AudioFile, OpenAiSpeechConfig, OpenAiWhisperProvider, SpeechError, SpeechToText};
use application::{
    error::ApplicationError,
    ports::{AudioSource, TranscriptionPort},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for speech-to-text using the ai_speech crate
pub struct SpeechAdapter {
    provider: Arc<dyn SpeechToText>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("model", &self.provider.model_name())
            .field("configured", &self.provider.is_configured())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create an adapter backed by OpenAI Whisper
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn new(config: OpenAiSpeechConfig) -> Result<Self, ApplicationError> {
        let provider = OpenAiWhisperProvider::new(config).map_err(map_speech_error)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create with a custom provider (for testing)
    pub fn with_provider(provider: Arc<dyn SpeechToText>) -> Self {
        Self { provider }
    }
}

pub(crate) fn to_audio_file(source: &AudioSource) -> AudioFile {
    AudioFile::new(
        source.path.clone(),
        source.filename.clone(),
        source.content_type.clone(),
    )
}

/// Provider failures are all upstream errors except a missing key
pub(crate) fn map_speech_error(err: SpeechError) -> ApplicationError {
    match err {
        SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

#[async_trait]
impl TranscriptionPort for SpeechAdapter {
    #[instrument(skip(self, audio), fields(filename = %audio.filename))]
    async fn transcribe(&self, audio: &AudioSource) -> Result<String, ApplicationError> {
        let text = self
            .provider
            .transcribe_file(&to_audio_file(audio))
            .await
            .map_err(map_speech_error)?;
        debug!(chars = text.len(), "Transcription complete");
        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct FixedProvider {
        result: fn() -> Result<String, SpeechError>,
    }

    #[async_trait]
    impl SpeechToText for FixedProvider {
        async fn transcribe_file(&self, audio: &AudioFile) -> Result<String, SpeechError> {
            assert_eq!(audio.content_type, "audio/mpeg");
            (self.result)()
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn source() -> AudioSource {
        AudioSource {
            path: PathBuf::from("/tmp/audio-1.mp3"),
            filename: "clip.mp3".to_string(),
            content_type: "audio/mpeg".to_string(),
        }
    }

    fn adapter(result: fn() -> Result<String, SpeechError>) -> SpeechAdapter {
        SpeechAdapter::with_provider(Arc::new(FixedProvider { result }))
    }

    #[tokio::test]
    async fn passes_text_through() {
        let text = adapter(|| Ok("hello world".to_string()))
            .transcribe(&source())
            .await
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn missing_key_is_configuration_error() {
        let err = adapter(|| Err(SpeechError::Configuration("no key".to_string())))
            .transcribe(&source())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(ref m) if m == "no key"));
    }

    #[tokio::test]
    async fn provider_rejection_is_external_service_error() {
        let err = adapter(|| {
            Err(SpeechError::Rejected {
                status: 400,
                message: "Invalid file format".to_string(),
            })
        })
        .transcribe(&source())
        .await
        .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert_eq!(err.to_string(), "Invalid file format");
    }

    #[test]
    fn unconfigured_openai_provider_reports_so() {
        let adapter = SpeechAdapter::new(OpenAiSpeechConfig::default()).unwrap();
        assert!(!adapter.is_configured());
    }
}
