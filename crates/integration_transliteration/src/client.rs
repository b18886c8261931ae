//! Google Input Tools client
//!
//! `GET /request?text=<word>&itc=<lang>-t-i0-und&num=1` answers with
//! `["SUCCESS", [[<input>, [<candidate>, ...], ...]]]`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transliteration client errors
#[derive(Debug, Error)]
pub enum TransliterationError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The endpoint answered but not with a usable candidate
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl From<reqwest::Error> for TransliterationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Transliteration service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransliterationConfig {
    /// Input Tools base URL (default: <https://inputtools.google.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether the remote endpoint is used at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_base_url() -> String {
    "https://inputtools.google.com".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_enabled() -> bool {
    true
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            enabled: default_enabled(),
        }
    }
}

/// Remote transliteration of a single word
#[async_trait]
pub trait TransliterationClient: Send + Sync {
    /// Best native-script candidate for `word` in `language`
    async fn transliterate_word(
        &self,
        word: &str,
        language: &str,
    ) -> Result<String, TransliterationError>;
}

/// Input Tools HTTP client
#[derive(Debug, Clone)]
pub struct GoogleInputToolsClient {
    client: Client,
    config: TransliterationConfig,
}

impl GoogleInputToolsClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TransliterationConfig) -> Result<Self, TransliterationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransliterationError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn parse_candidate(body: &Value) -> Result<String, TransliterationError> {
        let status = body.get(0).and_then(Value::as_str).unwrap_or_default();
        if status != "SUCCESS" {
            return Err(TransliterationError::UnexpectedResponse(format!(
                "status {status:?}"
            )));
        }

        body.pointer("/1/0/1/0")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| TransliterationError::UnexpectedResponse("no candidates".to_string()))
    }
}

#[async_trait]
impl TransliterationClient for GoogleInputToolsClient {
    #[instrument(skip(self))]
    async fn transliterate_word(
        &self,
        word: &str,
        language: &str,
    ) -> Result<String, TransliterationError> {
        let itc = format!("{language}-t-i0-und");
        let url = format!("{}/request", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[("text", word), ("itc", itc.as_str()), ("num", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransliterationError::RequestFailed(format!("HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransliterationError::UnexpectedResponse(e.to_string()))?;
        let candidate = Self::parse_candidate(&body)?;
        debug!(candidate = %candidate, "Remote transliteration");
        Ok(candidate)
    }
}
