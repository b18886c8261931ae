//! Languages offered by the generator

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Target language for generation and transliteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Telugu,
    Bengali,
    Gujarati,
    Marathi,
    Punjabi,
    Urdu,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
}

impl Language {
    /// All supported languages
    pub const ALL: [Self; 15] = [
        Self::English,
        Self::Hindi,
        Self::Tamil,
        Self::Telugu,
        Self::Bengali,
        Self::Gujarati,
        Self::Marathi,
        Self::Punjabi,
        Self::Urdu,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Portuguese,
        Self::Russian,
    ];

    /// ISO 639-1 code
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Tamil => "ta",
            Self::Telugu => "te",
            Self::Bengali => "bn",
            Self::Gujarati => "gu",
            Self::Marathi => "mr",
            Self::Punjabi => "pa",
            Self::Urdu => "ur",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
        }
    }

    /// Whether text in this language is written in a non-Latin script that
    /// romanised input should be transliterated into
    pub const fn needs_transliteration(self) -> bool {
        matches!(
            self,
            Self::Hindi
                | Self::Tamil
                | Self::Telugu
                | Self::Bengali
                | Self::Gujarati
                | Self::Marathi
                | Self::Punjabi
                | Self::Urdu
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| DomainError::UnsupportedLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("TA".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn rejects_unknown_code() {
        let err = "xx".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported language: xx");
    }

    #[test]
    fn every_language_round_trips_through_its_code() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn only_indic_scripts_need_transliteration() {
        assert!(Language::Hindi.needs_transliteration());
        assert!(Language::Urdu.needs_transliteration());
        assert!(!Language::English.needs_transliteration());
        assert!(!Language::Russian.needs_transliteration());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Language::Bengali).unwrap();
        assert_eq!(json, "\"bn\"");
        let parsed: Language = serde_json::from_str("\"gu\"").unwrap();
        assert_eq!(parsed, Language::Gujarati);
        assert!(serde_json::from_str::<Language>("\"zz\"").is_err());
    }
}
