//! Local storage for uploads and generated audio.

use std::path::PathBuf;

use domain::{TRANSCRIPTION_MAX_BYTES, VOICE_SAMPLE_MAX_BYTES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where uploads are written while a provider call is in flight
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Where synthesized audio is kept for download
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_max_transcription_bytes")]
    pub max_transcription_bytes: usize,

    #[serde(default = "default_max_voice_sample_bytes")]
    pub max_voice_sample_bytes: usize,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads/audio")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

const fn default_max_transcription_bytes() -> usize {
    TRANSCRIPTION_MAX_BYTES
}

const fn default_max_voice_sample_bytes() -> usize {
    VOICE_SAMPLE_MAX_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            max_transcription_bytes: default_max_transcription_bytes(),
            max_voice_sample_bytes: default_max_voice_sample_bytes(),
        }
    }
}

impl StorageConfig {
    /// Largest request body the server has to accept
    pub fn max_body_bytes(&self) -> usize {
        // multipart framing and the text field ride on top of the file
        self.max_transcription_bytes
            .max(self.max_voice_sample_bytes)
            .saturating_add(1024 * 1024)
    }
}
