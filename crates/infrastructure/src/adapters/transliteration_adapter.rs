//! Transliteration adapter - Google Input Tools with dictionary fallback

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{Transliteration, TransliterationPort, TransliterationSource},
};
use async_trait::async_trait;
use domain::Language;
use integration_transliteration::{
    GoogleInputToolsClient, OutcomeSource, TransliterationConfig, Transliterator,
};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct TransliterationAdapter {
    transliterator: Transliterator,
}

impl TransliterationAdapter {
    /// Remote endpoint when enabled, dictionary only otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TransliterationConfig) -> Result<Self, ApplicationError> {
        if !config.enabled {
            debug!("Remote transliteration disabled, using dictionary only");
            return Ok(Self::offline());
        }
        let client = GoogleInputToolsClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self {
            transliterator: Transliterator::new(Arc::new(client)),
        })
    }

    pub const fn offline() -> Self {
        Self {
            transliterator: Transliterator::offline(),
        }
    }
}

const fn to_source(source: OutcomeSource) -> TransliterationSource {
    match source {
        OutcomeSource::Remote => TransliterationSource::Remote,
        OutcomeSource::Fallback => TransliterationSource::Fallback,
        OutcomeSource::Passthrough => TransliterationSource::Passthrough,
    }
}

#[async_trait]
impl TransliterationPort for TransliterationAdapter {
    #[instrument(skip(self, text), fields(language = %language.code()))]
    async fn transliterate(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Transliteration, ApplicationError> {
        let outcome = self
            .transliterator
            .transliterate(text, language.code())
            .await;
        Ok(Transliteration {
            text: outcome.text,
            source: to_source(outcome.source),
        })
    }
}
