//! Transliteration port

use std::fmt;

use async_trait::async_trait;
use domain::Language;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Where a transliteration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransliterationSource {
    /// The remote input-tools endpoint
    Remote,
    /// The built-in dictionary
    Fallback,
    /// Returned unchanged
    Passthrough,
}

impl fmt::Display for TransliterationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
            Self::Passthrough => "passthrough",
        })
    }
}

/// Transliterated text and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
    pub text: String,
    pub source: TransliterationSource,
}

/// Port for converting romanised text into a native script
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransliterationPort: Send + Sync {
    async fn transliterate(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Transliteration, ApplicationError>;
}
