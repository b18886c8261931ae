//! Voice adapter - Implements VoiceProviderPort using ElevenLabs

use std::sync::Arc;

use ai_speech::{ElevenLabsConfig, ElevenLabsProvider, SpeechError, VoiceCloning, VoiceInfo};
use application::{
    error::ApplicationError,
    ports::{AudioSource, VoiceProviderPort},
};
use async_trait::async_trait;
use domain::VoiceSummary;
use tracing::{info, instrument};

use super::speech_adapter::{map_speech_error, to_audio_file};

pub struct VoiceAdapter {
    provider: Arc<dyn VoiceCloning>,
}

impl std::fmt::Debug for VoiceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceAdapter")
            .field("configured", &self.provider.is_configured())
            .finish()
    }
}

impl VoiceAdapter {
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, ApplicationError> {
        let provider = ElevenLabsProvider::new(config).map_err(map_speech_error)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn VoiceCloning>) -> Self {
        Self { provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }
}

/// The provider's own refusals reach the client as bad requests
fn map_voice_error(err: SpeechError) -> ApplicationError {
    if err.is_rejection() {
        ApplicationError::Rejected(err.to_string())
    } else {
        map_speech_error(err)
    }
}

fn to_summary(voice: VoiceInfo) -> VoiceSummary {
    VoiceSummary {
        voice_id: voice.voice_id,
        name: voice.name,
        category: voice.category,
        description: voice.description,
        preview_url: voice.preview_url,
    }
}

#[async_trait]
impl VoiceProviderPort for VoiceAdapter {
    #[instrument(skip(self, description, sample), fields(sample = %sample.filename))]
    async fn clone_voice(
        &self,
        name: &str,
        description: &str,
        sample: &AudioSource,
    ) -> Result<String, ApplicationError> {
        let voice_id = self
            .provider
            .add_voice(name, description, &to_audio_file(sample))
            .await
            .map_err(map_voice_error)?;
        info!(voice_id = %voice_id, "Voice registered");
        Ok(voice_id)
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, ApplicationError> {
        self.provider
            .text_to_speech(voice_id, text)
            .await
            .map_err(map_voice_error)
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> Result<Vec<VoiceSummary>, ApplicationError> {
        let voices = self.provider.list_voices().await.map_err(map_voice_error)?;
        Ok(voices.into_iter().map(to_summary).collect())
    }

    #[instrument(skip(self))]
    async fn delete_voice(&self, voice_id: &str) -> Result<(), ApplicationError> {
        self.provider
            .delete_voice(voice_id)
            .await
            .map_err(map_voice_error)
    }
}
