//! Transliteration integration
//!
//! Converts romanised text into native scripts for Indic languages and Urdu
//! using the public Google Input Tools endpoint, falling back to a small
//! built-in dictionary when the endpoint is unavailable.

pub mod client;
pub mod dictionary;
mod transliterator;

pub use client::{
    GoogleInputToolsClient, TransliterationClient, TransliterationConfig, TransliterationError,
};
pub use transliterator::{Outcome, OutcomeSource, SUPPORTED_LANGUAGES, Transliterator};
