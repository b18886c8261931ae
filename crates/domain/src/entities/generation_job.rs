//! Speech generation job
//!
//! A job walks `queued → cleaning → transliterating → synthesizing → completed`.
//! Any non-terminal state may move to `failed`. Each stage is entered before
//! its work starts and finished once the work has produced a result, so the
//! progress value only ever reflects completed work.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::DomainError, value_objects::Language};

/// Upper bound on the text a single job accepts
pub const MAX_GENERATION_TEXT_CHARS: usize = 5000;

const PREVIEW_CHARS: usize = 100;

/// Stage of a generation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Queued,
    Cleaning,
    Transliterating,
    Synthesizing,
    Completed,
    Failed,
}

impl GenerationStatus {
    /// Progress reported when the stage is entered
    pub const fn entry_progress(self) -> u8 {
        match self {
            Self::Queued => 0,
            Self::Cleaning => 20,
            Self::Transliterating => 60,
            Self::Synthesizing => 90,
            Self::Completed => 100,
            Self::Failed => 0,
        }
    }

    /// Whether the job can no longer change
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Queued => Some(Self::Cleaning),
            Self::Cleaning => Some(Self::Transliterating),
            Self::Transliterating => Some(Self::Synthesizing),
            Self::Synthesizing => Some(Self::Completed),
            Self::Completed | Self::Failed => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Cleaning => "cleaning",
            Self::Transliterating => "transliterating",
            Self::Synthesizing => "synthesizing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One text-to-speech generation request and its progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationJob {
    pub id: Uuid,
    /// Preview of the input, truncated to 100 characters
    pub text: String,
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliterated_text: Option<String>,
    pub language: Language,
    pub voice: String,
    pub status: GenerationStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl GenerationJob {
    /// Create a queued job, rejecting empty or oversized text
    pub fn new(
        text: &str,
        language: Language,
        voice: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "Text is required".to_string(),
            ));
        }
        if text.chars().count() > MAX_GENERATION_TEXT_CHARS {
            return Err(DomainError::ValidationError(format!(
                "Text must be at most {MAX_GENERATION_TEXT_CHARS} characters"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text: preview(text),
            original_text: text.to_string(),
            cleaned_text: None,
            transliterated_text: None,
            language,
            voice: voice.into(),
            status: GenerationStatus::Queued,
            progress: 0,
            audio_url: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    fn advance_to(&mut self, to: GenerationStatus) -> Result<(), DomainError> {
        if self.status.next() != Some(to) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.progress = to.entry_progress();
        Ok(())
    }

    fn expect_status(&self, expected: GenerationStatus, to: &str) -> Result<(), DomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            })
        }
    }

    pub fn start_cleaning(&mut self) -> Result<(), DomainError> {
        self.advance_to(GenerationStatus::Cleaning)
    }

    /// Record cleaned text; progress moves to 40
    pub fn finish_cleaning(&mut self, cleaned: String) -> Result<(), DomainError> {
        self.expect_status(GenerationStatus::Cleaning, "cleaned")?;
        self.cleaned_text = Some(cleaned);
        self.progress = 40;
        Ok(())
    }

    pub fn start_transliterating(&mut self) -> Result<(), DomainError> {
        if self.cleaned_text.is_none() {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: GenerationStatus::Transliterating.to_string(),
            });
        }
        self.advance_to(GenerationStatus::Transliterating)
    }

    /// Record transliterated text; progress moves to 80
    pub fn finish_transliterating(&mut self, transliterated: String) -> Result<(), DomainError> {
        self.expect_status(GenerationStatus::Transliterating, "transliterated")?;
        self.transliterated_text = Some(transliterated);
        self.progress = 80;
        Ok(())
    }

    pub fn start_synthesizing(&mut self) -> Result<(), DomainError> {
        if self.transliterated_text.is_none() {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: GenerationStatus::Synthesizing.to_string(),
            });
        }
        self.advance_to(GenerationStatus::Synthesizing)
    }

    /// Mark the job completed with the location of its audio
    pub fn complete(&mut self, audio_url: impl Into<String>) -> Result<(), DomainError> {
        self.advance_to(GenerationStatus::Completed)?;
        self.audio_url = Some(audio_url.into());
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the job failed, keeping the progress reached so far
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: GenerationStatus::Failed.to_string(),
            });
        }
        self.status = GenerationStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Text that should be handed to synthesis
    pub fn speech_text(&self) -> Option<&str> {
        self.transliterated_text
            .as_deref()
            .or(self.cleaned_text.as_deref())
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
