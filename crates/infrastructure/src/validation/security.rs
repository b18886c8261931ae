//! Security validation for application configuration
//!
//! Reports insecure or incomplete settings at startup. Nothing here blocks
//! startup; the caller decides what to do with critical findings.

use std::fmt;

use tracing::{error, info, warn};

use crate::config::AppConfig;

/// Length of the XChaCha20-Poly1305 key
const SESSION_KEY_LEN: usize = 32;

/// Severity level for security warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    Info,
    Warning,
    /// Must be addressed in production
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A security warning with severity and description
#[derive(Debug, Clone)]
pub struct SecurityWarning {
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: &'static str,
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl SecurityWarning {
    fn new(
        severity: WarningSeverity,
        code: &'static str,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for SecurityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Validates application configuration for security issues
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityValidator;

impl SecurityValidator {
    /// All findings, critical first
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();
        let is_production = config.is_production();

        Self::check_session_key(config, is_production, &mut warnings);
        Self::check_cors(config, is_production, &mut warnings);
        Self::check_providers(config, &mut warnings);

        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));
        warnings
    }

    /// Emit each finding at a log level matching its severity
    pub fn log_warnings(warnings: &[SecurityWarning]) {
        for w in warnings {
            match w.severity {
                WarningSeverity::Critical => error!(code = w.code, "{w}"),
                WarningSeverity::Warning => warn!(code = w.code, "{w}"),
                WarningSeverity::Info => info!(code = w.code, "{w}"),
            }
        }
    }

    fn check_session_key(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        match config.security.session_key_bytes() {
            Ok(None) if is_production => warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "SESSION_KEY_MISSING",
                "Stored API keys are not encrypted",
                "Set security.session_encryption_key to a base64 encoded 32-byte key",
            )),
            Ok(Some(key)) if key.len() != SESSION_KEY_LEN => {
                warnings.push(SecurityWarning::new(
                    WarningSeverity::Critical,
                    "SESSION_KEY_LENGTH",
                    format!(
                        "Session encryption key is {} bytes, expected {SESSION_KEY_LEN}",
                        key.len()
                    ),
                    "Generate a new key with `openssl rand -base64 32`",
                ));
            },
            Err(e) => warnings.push(SecurityWarning::new(
                WarningSeverity::Critical,
                "SESSION_KEY_ENCODING",
                format!("Session encryption key is not valid base64: {e}"),
                "Generate a new key with `openssl rand -base64 32`",
            )),
            _ => {},
        }
    }

    fn check_cors(config: &AppConfig, is_production: bool, warnings: &mut Vec<SecurityWarning>) {
        if is_production && config.server.allows_any_origin() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "CORS_ANY_ORIGIN",
                "CORS allows requests from any origin",
                "List the frontend origins in server.allowed_origins",
            ));
        }
    }

    fn check_providers(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        if !config.supabase.is_configured() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Warning,
                "SUPABASE_UNCONFIGURED",
                "Supabase URL or service role key is missing; todo and session routes will fail",
                "Set SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY",
            ));
        }
        if config.speech.api_key.is_none() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Info,
                "OPENAI_KEY_MISSING",
                "Transcription is not configured",
                "Set OPENAI_API_KEY",
            ));
        }
        if config.voice.api_key.is_none() {
            warnings.push(SecurityWarning::new(
                WarningSeverity::Info,
                "ELEVENLABS_KEY_MISSING",
                "Voice cloning and generation are not configured",
                "Set ELEVENLABS_API_KEY",
            ));
        }
    }
}
