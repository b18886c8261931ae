//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech provider adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioFile, VoiceInfo};

/// Port for Speech-to-Text (STT) implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio file on disk to plain text
    ///
    /// The file is streamed to the provider rather than read into memory.
    async fn transcribe_file(&self, audio: &AudioFile) -> Result<String, SpeechError>;

    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Get the name of the current STT model
    fn model_name(&self) -> &str;
}

/// Port for voice cloning and synthesis with cloned voices
#[async_trait]
pub trait VoiceCloning: Send + Sync {
    /// Register a voice built from `sample`, returning the provider's voice id
    async fn add_voice(
        &self,
        name: &str,
        description: &str,
        sample: &AudioFile,
    ) -> Result<String, SpeechError>;

    /// Synthesize `text` with a voice, returning MP3 bytes
    async fn text_to_speech(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, SpeechError>;

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    async fn delete_voice(&self, voice_id: &str) -> Result<(), SpeechError>;

    fn is_configured(&self) -> bool;
}
