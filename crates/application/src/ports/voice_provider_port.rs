//! Voice cloning and text-to-speech port

use async_trait::async_trait;
use domain::VoiceSummary;
#[cfg(test)]
use mockall::automock;

use super::AudioSource;
use crate::error::ApplicationError;

/// Port for the hosted voice provider
///
/// Adapters map provider rejections to [`ApplicationError::Rejected`] and
/// transport failures to [`ApplicationError::ExternalService`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoiceProviderPort: Send + Sync {
    /// Register a new voice from a sample, returning its id
    async fn clone_voice(
        &self,
        name: &str,
        description: &str,
        sample: &AudioSource,
    ) -> Result<String, ApplicationError>;

    /// Speak `text` with the given voice, returning MP3 bytes
    async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, ApplicationError>;

    async fn list_voices(&self) -> Result<Vec<VoiceSummary>, ApplicationError>;

    async fn delete_voice(&self, voice_id: &str) -> Result<(), ApplicationError>;
}
