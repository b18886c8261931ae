//! Voice cloning and the provider's voice library

use std::{fmt, path::PathBuf, sync::Arc};

use domain::{
    AudioUploadPolicy, DomainError, MAX_GENERATION_TEXT_CHARS, VoiceCloneOutcome, VoiceSummary,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    audio_store::GeneratedAudioStore,
    upload::{AudioUpload, ScopedUpload},
};
use crate::{error::ApplicationError, ports::VoiceProviderPort};

const CLONE_DESCRIPTION: &str = "Voice cloned from an uploaded sample";

/// Service behind `/api/clone-voice` and `/api/voices`
pub struct VoiceCloneService {
    provider: Arc<dyn VoiceProviderPort>,
    upload_dir: PathBuf,
    audio_store: GeneratedAudioStore,
    policy: AudioUploadPolicy,
}

impl fmt::Debug for VoiceCloneService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCloneService")
            .field("upload_dir", &self.upload_dir)
            .field("audio_store", &self.audio_store)
            .finish_non_exhaustive()
    }
}

impl VoiceCloneService {
    pub fn new(
        provider: Arc<dyn VoiceProviderPort>,
        upload_dir: impl Into<PathBuf>,
        audio_store: GeneratedAudioStore,
    ) -> Self {
        Self {
            provider,
            upload_dir: upload_dir.into(),
            audio_store,
            policy: AudioUploadPolicy::voice_sample(),
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: AudioUploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn policy(&self) -> AudioUploadPolicy {
        self.policy
    }

    /// Clone a voice from `sample` and speak `text` with it
    ///
    /// The sample is written to the upload directory for the provider call
    /// and removed on every exit path.
    #[instrument(skip(self, text, sample), fields(
        chars = text.len(),
        content_type = %sample.content_type,
        bytes = sample.len()
    ))]
    pub async fn clone_and_speak(
        &self,
        text: &str,
        sample: &AudioUpload,
    ) -> Result<VoiceCloneOutcome, ApplicationError> {
        validate_text(text)?;
        self.policy.check(&sample.content_type, sample.len())?;

        let stored = ScopedUpload::write(&self.upload_dir, sample).await?;
        let name = format!("voice_clone_{}", short_id());
        let voice_id = self
            .provider
            .clone_voice(&name, CLONE_DESCRIPTION, stored.source())
            .await?;
        drop(stored);
        info!(voice_id = %voice_id, name = %name, "Voice cloned");

        let audio = self.provider.synthesize(&voice_id, text).await?;
        let audio = self.audio_store.save(&audio).await?;

        Ok(VoiceCloneOutcome { voice_id, audio })
    }

    #[instrument(skip(self))]
    pub async fn list_voices(&self) -> Result<Vec<VoiceSummary>, ApplicationError> {
        self.provider.list_voices().await
    }

    #[instrument(skip(self))]
    pub async fn delete_voice(&self, voice_id: &str) -> Result<(), ApplicationError> {
        if voice_id.trim().is_empty() {
            return Err(ApplicationError::InvalidInput("voice_id is required".to_string()));
        }
        self.provider.delete_voice(voice_id).await
    }

    pub fn audio_store(&self) -> &GeneratedAudioStore {
        &self.audio_store
    }
}

fn validate_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::ValidationError("Text is required".to_string()));
    }
    if text.chars().count() > MAX_GENERATION_TEXT_CHARS {
        return Err(DomainError::ValidationError(format!(
            "Text must be at most {MAX_GENERATION_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
