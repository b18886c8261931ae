//! Types shared by speech providers

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// An audio file on local disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub path: PathBuf,
    /// File name sent to the provider
    pub filename: String,
    /// MIME type sent to the provider
    pub content_type: String,
}

impl AudioFile {
    pub fn new(
        path: impl Into<PathBuf>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A voice in the provider's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Voice tuning sent with each synthesis request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_info_ignores_unknown_fields() {
        let json = r#"{
            "voice_id": "abc",
            "name": "Clone",
            "category": "cloned",
            "labels": {"accent": "british"},
            "samples": null
        }"#;
        let voice: VoiceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(voice.voice_id, "abc");
        assert_eq!(voice.category.as_deref(), Some("cloned"));
        assert!(voice.preview_url.is_none());
    }

    #[test]
    fn audio_file_keeps_metadata() {
        let file = AudioFile::new("/tmp/a.wav", "a.wav", "audio/wav");
        assert_eq!(file.path(), Path::new("/tmp/a.wav"));
        assert_eq!(file.content_type, "audio/wav");
    }
}
