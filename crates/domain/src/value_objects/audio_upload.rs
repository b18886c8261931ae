//! Audio upload acceptance rules
//!
//! Transcription accepts any `audio/*` upload up to 25 MB; voice cloning
//! only accepts a handful of sample formats up to 15 MB.

use crate::errors::DomainError;

/// Maximum size of an audio file sent for transcription
pub const TRANSCRIPTION_MAX_BYTES: usize = 25 * 1024 * 1024;

/// Maximum size of a voice sample used for cloning
pub const VOICE_SAMPLE_MAX_BYTES: usize = 15 * 1024 * 1024;

/// MIME types accepted as voice samples
pub const VOICE_SAMPLE_TYPES: &[&str] = &["audio/wav", "audio/mp3", "audio/webm", "audio/mpeg"];

/// Which media types an upload policy accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedAudioTypes {
    /// Any `audio/*` media type
    AnyAudio,
    /// Only the listed media types
    Only(&'static [&'static str]),
}

/// Size and media-type limits for an uploaded audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioUploadPolicy {
    pub max_bytes: usize,
    pub allowed: AllowedAudioTypes,
}

impl AudioUploadPolicy {
    /// Policy for `/api/transcribe`
    pub const fn transcription() -> Self {
        Self {
            max_bytes: TRANSCRIPTION_MAX_BYTES,
            allowed: AllowedAudioTypes::AnyAudio,
        }
    }

    /// Policy for voice clone samples
    pub const fn voice_sample() -> Self {
        Self {
            max_bytes: VOICE_SAMPLE_MAX_BYTES,
            allowed: AllowedAudioTypes::Only(VOICE_SAMPLE_TYPES),
        }
    }

    /// Override the size limit
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Check the declared media type only
    ///
    /// Parameters such as `; codecs=opus` are ignored.
    pub fn check_media_type(&self, content_type: &str) -> Result<(), DomainError> {
        let base = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let accepted = match self.allowed {
            AllowedAudioTypes::AnyAudio => base.starts_with("audio/"),
            AllowedAudioTypes::Only(types) => types.contains(&base.as_str()),
        };

        if accepted {
            Ok(())
        } else {
            Err(DomainError::UnsupportedMediaType(match self.allowed {
                AllowedAudioTypes::AnyAudio => "Only audio files are allowed".to_string(),
                AllowedAudioTypes::Only(types) => {
                    format!("Invalid audio file. Accepted types: {}", types.join(", "))
                },
            }))
        }
    }

    /// Check the size only
    pub const fn check_size(&self, size: usize) -> Result<(), DomainError> {
        if size > self.max_bytes {
            return Err(DomainError::FileTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Check media type and size
    pub fn check(&self, content_type: &str, size: usize) -> Result<(), DomainError> {
        self.check_media_type(content_type)?;
        self.check_size(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_accepts_any_audio_type() {
        let policy = AudioUploadPolicy::transcription();
        assert!(policy.check("audio/mpeg", 10).is_ok());
        assert!(policy.check("audio/x-m4a", 10).is_ok());
        assert!(policy.check("audio/ogg; codecs=opus", 10).is_ok());
        assert!(policy.check("AUDIO/WAV", 10).is_ok());
    }

    #[test]
    fn transcription_rejects_non_audio() {
        let policy = AudioUploadPolicy::transcription();
        let err = policy.check("text/plain", 10).unwrap_err();
        assert_eq!(err.to_string(), "Only audio files are allowed");
        assert!(policy.check("video/mp4", 10).is_err());
        assert!(policy.check("", 10).is_err());
    }

    #[test]
    fn transcription_limit_is_25_mb() {
        let policy = AudioUploadPolicy::transcription();
        assert!(policy.check_size(TRANSCRIPTION_MAX_BYTES).is_ok());
        assert!(matches!(
            policy.check_size(TRANSCRIPTION_MAX_BYTES + 1),
            Err(DomainError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn voice_sample_only_accepts_listed_types() {
        let policy = AudioUploadPolicy::voice_sample();
        assert!(policy.check("audio/wav", 1).is_ok());
        assert!(policy.check("audio/webm", 1).is_ok());
        assert!(policy.check("audio/ogg", 1).is_err());
    }

    #[test]
    fn voice_sample_limit_is_15_mb() {
        let policy = AudioUploadPolicy::voice_sample();
        assert!(policy.check("audio/mpeg", VOICE_SAMPLE_MAX_BYTES + 1).is_err());
    }

    #[test]
    fn max_bytes_can_be_overridden() {
        let policy = AudioUploadPolicy::transcription().with_max_bytes(4);
        assert!(policy.check_size(4).is_ok());
        assert!(policy.check_size(5).is_err());
    }
}
