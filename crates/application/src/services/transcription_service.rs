//! Audio transcription through the hosted speech-to-text provider

use std::{fmt, path::PathBuf, sync::Arc};

use domain::{AudioUploadPolicy, TranscriptionRecord};
use tracing::{info, instrument, warn};

use super::upload::{AudioUpload, ScopedUpload};
use crate::{error::ApplicationError, ports::TranscriptionPort};

/// Service behind `/api/transcribe`
pub struct TranscriptionService {
    port: Arc<dyn TranscriptionPort>,
    upload_dir: PathBuf,
    policy: AudioUploadPolicy,
}

impl fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionService")
            .field("upload_dir", &self.upload_dir)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl TranscriptionService {
    pub fn new(port: Arc<dyn TranscriptionPort>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            port,
            upload_dir: upload_dir.into(),
            policy: AudioUploadPolicy::transcription(),
        }
    }

    /// Override the upload policy (size limit)
    #[must_use]
    pub const fn with_policy(mut self, policy: AudioUploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn policy(&self) -> AudioUploadPolicy {
        self.policy
    }

    pub fn is_configured(&self) -> bool {
        self.port.is_configured()
    }

    /// Validate, store, transcribe and remove one upload
    ///
    /// Validation happens before anything touches disk. The stored copy is
    /// removed on every path out of this function.
    #[instrument(skip(self, upload), fields(
        filename = %upload.filename,
        content_type = %upload.content_type,
        bytes = upload.len()
    ))]
    pub async fn transcribe(
        &self,
        upload: &AudioUpload,
    ) -> Result<TranscriptionRecord, ApplicationError> {
        self.policy.check(&upload.content_type, upload.len())?;

        let stored = ScopedUpload::write(&self.upload_dir, upload).await?;
        let text = self
            .port
            .transcribe(stored.source())
            .await
            .inspect_err(|e| warn!(error = %e, "Transcription provider failed"))?;
        drop(stored);

        info!(chars = text.len(), "Transcription completed");
        Ok(TranscriptionRecord::new(text, upload.filename.clone()))
    }

    /// Past transcriptions; nothing is kept server-side
    pub fn history(&self) -> Vec<TranscriptionRecord> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use domain::DomainError;

    use super::*;
    use crate::ports::MockTranscriptionPort;

    fn upload(content_type: &str, data: &'static [u8]) -> AudioUpload {
        AudioUpload {
            field_name: "audio".to_string(),
            filename: "clip.mp3".to_string(),
            content_type: content_type.to_string(),
            data: Bytes::from_static(data),
        }
    }

    fn dir_is_empty(dir: &std::path::Path) -> bool {
        std::fs::read_dir(dir).map_or(true, |mut entries| entries.next().is_none())
    }

    #[tokio::test]
    async fn transcribes_and_removes_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut port = MockTranscriptionPort::new();
        port.expect_transcribe()
            .withf(|audio| audio.path.exists() && audio.filename == "clip.mp3")
            .times(1)
            .returning(|_| Ok("hello world".to_string()));

        let service = TranscriptionService::new(Arc::new(port), dir.path());
        let record = service
            .transcribe(&upload("audio/mpeg", b"ID3"))
            .await
            .unwrap();

        assert_eq!(record.text, "hello world");
        assert_eq!(record.filename, "clip.mp3");
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn provider_failure_still_removes_upload() {
        let dir = tempfile::tempdir().unwrap();
        let mut port = MockTranscriptionPort::new();
        port.expect_transcribe()
            .returning(|_| Err(ApplicationError::ExternalService("Invalid file format".into())));

        let service = TranscriptionService::new(Arc::new(port), dir.path());
        let err = service
            .transcribe(&upload("audio/wav", b"RIFF"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid file format");
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn non_audio_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut port = MockTranscriptionPort::new();
        port.expect_transcribe().never();

        let service = TranscriptionService::new(Arc::new(port), dir.path());
        let err = service
            .transcribe(&upload("text/plain", b"hi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnsupportedMediaType(_))
        ));
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn oversize_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut port = MockTranscriptionPort::new();
        port.expect_transcribe().never();

        let service = TranscriptionService::new(Arc::new(port), dir.path())
            .with_policy(AudioUploadPolicy::transcription().with_max_bytes(2));
        let err = service
            .transcribe(&upload("audio/wav", b"RIFF"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::FileTooLarge { .. })
        ));
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn history_is_empty() {
        let service =
            TranscriptionService::new(Arc::new(MockTranscriptionPort::new()), "uploads/audio");
        assert!(service.history().is_empty());
    }
}
