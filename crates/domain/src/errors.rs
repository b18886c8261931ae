//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A required field was missing or empty
    #[error("{0}")]
    MissingField(String),

    /// Uploaded file has a media type that is not accepted
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Uploaded file exceeds the size limit
    #[error("File too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    /// Unknown or unsupported language code
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Generation job state machine violation
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
