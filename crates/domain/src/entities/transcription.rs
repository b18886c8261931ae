//! Transcription result returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of one transcription request
///
/// Not persisted server-side. `duration` is a placeholder and is always zero
/// because the audio is never decoded locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    pub id: String,
    pub text: String,
    pub duration: f64,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptionRecord {
    /// Create a record for a freshly transcribed upload
    pub fn new(text: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            duration: 0.0,
            filename: filename.into(),
            timestamp: Utc::now(),
        }
    }
}
