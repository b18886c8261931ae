//! Romanised text to native script

use std::{fmt, sync::Arc};

use domain::Language;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{TransliterationPort, TransliterationSource},
};

/// Result returned to clients of `/api/transliterate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransliterationResult {
    pub original: String,
    pub transliterated: String,
    /// Language code as requested
    pub language: String,
    pub source: TransliterationSource,
}

/// Service deciding whether text needs transliteration at all
pub struct TransliterationService {
    port: Arc<dyn TransliterationPort>,
}

impl fmt::Debug for TransliterationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransliterationService").finish_non_exhaustive()
    }
}

impl TransliterationService {
    pub fn new(port: Arc<dyn TransliterationPort>) -> Self {
        Self { port }
    }

    /// Transliterate `text` for a language code
    ///
    /// English, unknown codes and languages written in Latin script come
    /// back unchanged without calling the port.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn transliterate(
        &self,
        text: &str,
        language: &str,
    ) -> Result<TransliterationResult, ApplicationError> {
        let target = language
            .parse::<Language>()
            .ok()
            .filter(|lang| lang.needs_transliteration());

        let (transliterated, source) = match target {
            Some(lang) if !text.trim().is_empty() => {
                let out = self.port.transliterate(text, lang).await?;
                (out.text, out.source)
            },
            _ => (text.to_string(), TransliterationSource::Passthrough),
        };

        debug!(source = %source, "Transliteration finished");
        Ok(TransliterationResult {
            original: text.to_string(),
            transliterated,
            language: language.to_string(),
            source,
        })
    }
}
