//! API error handling
//!
//! Every failure leaves the server as `{error, code, details?}`. Upstream
//! messages are passed through verbatim; internal errors keep their cause
//! in `details`.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    /// A hosted service failed; its message is shown to the caller as is
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named operation failed as a whole
    #[error("{message}: {details}")]
    Failed {
        message: &'static str,
        code: &'static str,
        details: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wrap an application error as the failure of `message`
    ///
    /// Client errors keep their own status so callers can fix the request.
    pub fn failed(message: &'static str, code: &'static str, err: ApplicationError) -> Self {
        if err.is_client_error() {
            return err.into();
        }
        Self::Failed {
            message,
            code,
            details: err.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(msg, "bad_request"),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, "not_found")),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::new("File too large", "payload_too_large"),
            ),
            Self::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(msg, "upstream_error"),
            ),
            Self::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(format!("Configuration error: {msg}"), "configuration_error"),
            ),
            Self::Failed {
                message,
                code,
                details,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(message, code).with_details(details),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal error", "internal_error").with_details(msg),
                )
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::FileTooLarge { .. } => Self::BadRequest("File too large".to_string()),
            DomainError::InvalidTransition { .. } => Self::Internal(err.to_string()),
            DomainError::ValidationError(_)
            | DomainError::MissingField(_)
            | DomainError::UnsupportedMediaType(_)
            | DomainError::UnsupportedLanguage(_) => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => e.into(),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::InvalidInput(msg) | ApplicationError::Rejected(msg) => {
                Self::BadRequest(msg)
            },
            ApplicationError::ExternalService(msg) => Self::Upstream(msg),
            ApplicationError::Configuration(msg) => Self::Configuration(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
