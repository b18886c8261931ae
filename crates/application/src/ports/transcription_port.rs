//! Speech-to-text port

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// An audio file on local disk handed to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub path: PathBuf,
    /// Name reported to the provider
    pub filename: String,
    pub content_type: String,
}

/// Port for the hosted transcription provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe a stored audio file into plain text
    async fn transcribe(&self, audio: &AudioSource) -> Result<String, ApplicationError>;

    /// Whether credentials for the provider are present
    fn is_configured(&self) -> bool;
}
