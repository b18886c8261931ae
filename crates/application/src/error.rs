//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller supplied unusable input
    #[error("{0}")]
    InvalidInput(String),

    /// An upstream service could not be reached or failed; the message is
    /// the upstream's own
    #[error("{0}")]
    ExternalService(String),

    /// An upstream service rejected the request
    #[error("{0}")]
    Rejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error was caused by the caller's input
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::Rejected(_)
                | Self::Domain(
                    DomainError::ValidationError(_)
                        | DomainError::MissingField(_)
                        | DomainError::UnsupportedMediaType(_)
                        | DomainError::FileTooLarge { .. }
                        | DomainError::UnsupportedLanguage(_)
                )
        )
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
