//! Voice provider entities

use serde::{Deserialize, Serialize};

/// A voice registered with the voice provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub voice_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Synthesized audio written to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAudio {
    /// File name inside the output directory
    pub filename: String,
    /// Public download path
    pub url: String,
}

impl GeneratedAudio {
    pub fn new(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let url = format!("/api/download/{filename}");
        Self { filename, url }
    }
}

/// Result of cloning a voice and speaking text with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCloneOutcome {
    pub voice_id: String,
    pub audio: GeneratedAudio,
}
