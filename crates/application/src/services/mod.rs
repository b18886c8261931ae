//! Application services
//!
//! One service per use case family. Services hold `Arc`-wrapped ports and
//! are shared read-only between requests.

mod audio_store;
mod auth_service;
mod generation_service;
mod health_service;
mod todo_service;
mod transcription_service;
mod transliteration_service;
mod upload;
mod voice_clone_service;

pub use audio_store::GeneratedAudioStore;
pub use auth_service::{AuthService, DEFAULT_REDIRECT_TO, SEALED_PREFIX};
pub use generation_service::{GenerationRequest, GenerationService};
pub use health_service::{DatabaseStatus, HealthService, ReadinessReport, TranscriptionStatus};
pub use todo_service::TodoService;
pub use transcription_service::TranscriptionService;
pub use transliteration_service::{TransliterationResult, TransliterationService};
pub use upload::{AudioUpload, ScopedUpload};
pub use voice_clone_service::VoiceCloneService;
