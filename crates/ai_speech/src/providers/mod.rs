//! Speech provider implementations

pub mod elevenlabs;
pub mod openai;

use reqwest::{Body, multipart::Part};

use crate::{error::SpeechError, types::AudioFile};

/// Build a multipart part that streams `audio` from disk
pub(crate) async fn file_part(audio: &AudioFile) -> Result<Part, SpeechError> {
    let file = tokio::fs::File::open(audio.path()).await?;
    let len = file.metadata().await?.len();

    Part::stream_with_length(Body::from(file), len)
        .file_name(audio.filename.clone())
        .mime_str(&audio.content_type)
        .map_err(|e| SpeechError::AudioFile(format!("Invalid MIME type: {e}")))
}
