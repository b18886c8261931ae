//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of Supabase,
//! OpenAI, ElevenLabs and Google Input Tools, and owns configuration
//! loading, logging setup and at-rest encryption of stored API keys.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod validation;

pub use adapters::*;
pub use config::{
    AppConfig, Environment, LogFormat, SecurityConfig, ServerConfig, SpeechAppConfig,
    StorageConfig, SupabaseAppConfig, TransliterationAppConfig, VoiceAppConfig,
};
pub use telemetry::{init_from_config, init_logging};
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
