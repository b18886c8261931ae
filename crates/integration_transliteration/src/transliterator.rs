//! Remote-first transliteration with dictionary fallback

use std::{fmt, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    client::{TransliterationClient, TransliterationError},
    dictionary,
};

/// Language codes the Input Tools endpoint is asked about
pub const SUPPORTED_LANGUAGES: [&str; 8] = ["hi", "ta", "te", "bn", "gu", "mr", "pa", "ur"];

/// Which path produced an [`Outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeSource {
    Remote,
    Fallback,
    Passthrough,
}

/// Transliterated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub text: String,
    pub source: OutcomeSource,
}

/// Transliterates whole texts
///
/// Every word goes to the remote client. If any word fails, the whole text
/// is redone from the dictionary so the result never mixes sources.
pub struct Transliterator {
    remote: Option<Arc<dyn TransliterationClient>>,
}

impl fmt::Debug for Transliterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transliterator")
            .field("remote", &self.remote.is_some())
            .finish()
    }
}

impl Transliterator {
    pub fn new(remote: Arc<dyn TransliterationClient>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    /// Dictionary only
    pub const fn offline() -> Self {
        Self { remote: None }
    }

    pub fn supports(language: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&language)
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn transliterate(&self, text: &str, language: &str) -> Outcome {
        if !Self::supports(language) || text.trim().is_empty() {
            return Outcome {
                text: text.to_string(),
                source: OutcomeSource::Passthrough,
            };
        }

        if let Some(remote) = &self.remote {
            match Self::remote(remote.as_ref(), text, language).await {
                Ok(text) => {
                    return Outcome {
                        text,
                        source: OutcomeSource::Remote,
                    };
                },
                Err(e) => warn!(error = %e, "Remote transliteration failed, using dictionary"),
            }
        }

        debug!("Dictionary transliteration");
        Outcome {
            text: dictionary::transliterate(text, language),
            source: OutcomeSource::Fallback,
        }
    }

    async fn remote(
        client: &dyn TransliterationClient,
        text: &str,
        language: &str,
    ) -> Result<String, TransliterationError> {
        let mut words = Vec::new();
        dictionary::map_words(text, |word| {
            words.push(word.to_string());
            None
        });

        let mut native = Vec::with_capacity(words.len());
        for word in &words {
            native.push(client.transliterate_word(word, language).await?);
        }

        let mut replacements = native.into_iter();
        Ok(dictionary::map_words(text, |_| replacements.next()))
    }
}
