//! Generated audio files served from the output directory

use std::path::{Path, PathBuf};

use domain::GeneratedAudio;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::ApplicationError;

/// Directory holding synthesized speech, exposed through `/api/download`
#[derive(Debug, Clone)]
pub struct GeneratedAudioStore {
    dir: PathBuf,
}

impl GeneratedAudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist MP3 bytes as `generated_speech_<8 hex>.mp3`
    #[instrument(skip(self, audio), fields(bytes = audio.len()))]
    pub async fn save(&self, audio: &[u8]) -> Result<GeneratedAudio, ApplicationError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let id = Uuid::new_v4().simple().to_string();
        let filename = format!("generated_speech_{}.mp3", &id[..8]);
        tokio::fs::write(self.dir.join(&filename), audio).await?;

        debug!(filename = %filename, "Saved generated audio");
        Ok(GeneratedAudio::new(filename))
    }

    /// Read a previously generated file
    ///
    /// Names with path separators or `..` are rejected before touching disk.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, ApplicationError> {
        if !is_plain_filename(filename) {
            return Err(ApplicationError::InvalidInput("Invalid filename".to_string()));
        }

        match tokio::fs::read(self.dir.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ApplicationError::NotFound("File not found".to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}
