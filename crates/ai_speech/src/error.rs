//! Speech provider errors

use thiserror::Error;

/// Errors that can occur talking to a speech provider
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed in transport
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a non-success status; `message` is the
    /// provider's own explanation
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local audio file could not be read
    #[error("Audio file error: {0}")]
    AudioFile(String),
}

impl SpeechError {
    /// Whether the provider refused the request (as opposed to being unreachable)
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestFailed(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for SpeechError {
    fn from(err: std::io::Error) -> Self {
        Self::AudioFile(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_shows_provider_message_only() {
        let err = SpeechError::Rejected {
            status: 400,
            message: "Invalid file format.".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid file format.");
        assert!(err.is_rejection());
    }

    #[test]
    fn configuration_error_message() {
        let err = SpeechError::Configuration("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
        assert!(!err.is_rejection());
    }

    #[test]
    fn timeout_error_message() {
        let err = SpeechError::Timeout(30000);
        assert_eq!(err.to_string(), "Speech processing timeout after 30000ms");
    }

    #[test]
    fn io_errors_become_audio_file_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(SpeechError::from(io), SpeechError::AudioFile(_)));
    }
}
