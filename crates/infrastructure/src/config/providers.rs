//! External service configurations: Supabase, OpenAI, ElevenLabs, Input Tools.

use ai_speech::{ElevenLabsConfig, OpenAiSpeechConfig};
use integration_supabase::SupabaseConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub use integration_transliteration::TransliterationConfig as TransliterationAppConfig;

fn expose(secret: Option<&SecretString>) -> Option<String> {
    secret.map(|s| s.expose_secret().to_string())
}

fn redacted(secret: Option<&SecretString>) -> Option<&'static str> {
    secret.map(|_| "[REDACTED]")
}

// ==============================
// Supabase Configuration
// ==============================

/// Supabase project backing todos and API-key sessions
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseAppConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Service role key (sensitive)
    #[serde(default, skip_serializing)]
    pub service_role_key: Option<SecretString>,

    #[serde(default = "default_supabase_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_todos_table")]
    pub todos_table: String,

    #[serde(default = "default_sessions_table")]
    pub sessions_table: String,
}

impl std::fmt::Debug for SupabaseAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAppConfig")
            .field("url", &self.url)
            .field("service_role_key", &redacted(self.service_role_key.as_ref()))
            .field("timeout_secs", &self.timeout_secs)
            .field("todos_table", &self.todos_table)
            .field("sessions_table", &self.sessions_table)
            .finish()
    }
}

const fn default_supabase_timeout() -> u64 {
    30
}

fn default_todos_table() -> String {
    SupabaseConfig::default().todos_table
}

fn default_sessions_table() -> String {
    SupabaseConfig::default().sessions_table
}

impl Default for SupabaseAppConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_role_key: None,
            timeout_secs: default_supabase_timeout(),
            todos_table: default_todos_table(),
            sessions_table: default_sessions_table(),
        }
    }
}

impl SupabaseAppConfig {
    /// Convert to `integration_supabase`'s `SupabaseConfig`
    #[must_use]
    pub fn to_supabase_config(&self) -> SupabaseConfig {
        SupabaseConfig {
            url: self.url.clone(),
            service_role_key: expose(self.service_role_key.as_ref()),
            timeout_secs: self.timeout_secs,
            todos_table: self.todos_table.clone(),
            sessions_table: self.sessions_table.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && self.service_role_key.is_some()
    }
}

// ==============================
// Speech-to-text Configuration
// ==============================

/// OpenAI transcription settings
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechAppConfig {
    /// OpenAI API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_stt_model")]
    pub model: String,

    /// Request timeout in milliseconds (default: 120000)
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

impl std::fmt::Debug for SpeechAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAppConfig")
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_openai_base_url() -> String {
    OpenAiSpeechConfig::default().base_url
}

fn default_stt_model() -> String {
    OpenAiSpeechConfig::default().model
}

const fn default_provider_timeout_ms() -> u64 {
    120_000
}

impl Default for SpeechAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_stt_model(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl SpeechAppConfig {
    /// Convert to `ai_speech`'s `OpenAiSpeechConfig`
    #[must_use]
    pub fn to_openai_config(&self) -> OpenAiSpeechConfig {
        OpenAiSpeechConfig {
            api_key: expose(self.api_key.as_ref()),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

// ==============================
// Voice Configuration
// ==============================

/// ElevenLabs voice cloning and synthesis settings
#[derive(Clone, Serialize, Deserialize)]
pub struct VoiceAppConfig {
    /// ElevenLabs API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    #[serde(default = "default_tts_model")]
    pub model_id: String,

    #[serde(default = "default_voice_setting")]
    pub stability: f32,

    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f32,

    /// Voice used for `/api/generate` when the request names none
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,

    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

impl std::fmt::Debug for VoiceAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceAppConfig")
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("stability", &self.stability)
            .field("similarity_boost", &self.similarity_boost)
            .field("default_voice_id", &self.default_voice_id)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_elevenlabs_base_url() -> String {
    ElevenLabsConfig::default().base_url
}

fn default_tts_model() -> String {
    ElevenLabsConfig::default().model_id
}

fn default_voice_setting() -> f32 {
    ElevenLabsConfig::default().stability
}

fn default_voice_id() -> String {
    ElevenLabsConfig::default().default_voice_id
}

impl Default for VoiceAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_base_url(),
            model_id: default_tts_model(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
            default_voice_id: default_voice_id(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl VoiceAppConfig {
    /// Convert to `ai_speech`'s `ElevenLabsConfig`
    #[must_use]
    pub fn to_elevenlabs_config(&self) -> ElevenLabsConfig {
        ElevenLabsConfig {
            api_key: expose(self.api_key.as_ref()),
            base_url: self.base_url.clone(),
            model_id: self.model_id.clone(),
            stability: self.stability,
            similarity_boost: self.similarity_boost,
            default_voice_id: self.default_voice_id.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}
