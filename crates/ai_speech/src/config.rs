//! Configuration for speech providers

use serde::{Deserialize, Serialize};

/// OpenAI transcription settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSpeechConfig {
    /// API key; requests fail with a configuration error when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (for proxies or test servers)
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_openai_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

const fn default_openai_timeout_ms() -> u64 {
    120_000
}

impl Default for OpenAiSpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_stt_model(),
            timeout_ms: default_openai_timeout_ms(),
        }
    }
}

impl OpenAiSpeechConfig {
    /// Whether a non-empty API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing key is allowed here; it is reported per request.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("OpenAI base URL cannot be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("Transcription model cannot be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// ElevenLabs voice cloning and synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    /// Text-to-speech model id
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    #[serde(default = "default_voice_setting")]
    pub stability: f32,

    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f32,

    /// Voice used when a caller names none
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_elevenlabs_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_tts_model() -> String {
    "eleven_monolingual_v1".to_string()
}

const fn default_voice_setting() -> f32 {
    0.5
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

const fn default_elevenlabs_timeout_ms() -> u64 {
    120_000
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_base_url(),
            model_id: default_tts_model(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
            default_voice_id: default_voice_id(),
            timeout_ms: default_elevenlabs_timeout_ms(),
        }
    }
}

impl ElevenLabsConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("ElevenLabs base URL cannot be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.stability) {
            return Err(format!(
                "Stability must be between 0.0 and 1.0, got {}",
                self.stability
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(format!(
                "Similarity boost must be between 0.0 and 1.0, got {}",
                self.similarity_boost
            ));
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
