//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod database_health_port;
mod encryption_port;
mod identity_provider_port;
mod session_store;
mod todo_store;
mod transcription_port;
mod transliteration_port;
mod voice_provider_port;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::DatabaseHealthPort;
#[cfg(test)]
pub use encryption_port::MockEncryptionPort;
pub use encryption_port::{EncryptionPort, NoOpEncryption};
#[cfg(test)]
pub use identity_provider_port::MockIdentityProviderPort;
pub use identity_provider_port::IdentityProviderPort;
#[cfg(test)]
pub use session_store::MockApiKeySessionStorePort;
pub use session_store::ApiKeySessionStorePort;
#[cfg(test)]
pub use todo_store::MockTodoStorePort;
pub use todo_store::TodoStorePort;
#[cfg(test)]
pub use transcription_port::MockTranscriptionPort;
pub use transcription_port::{AudioSource, TranscriptionPort};
#[cfg(test)]
pub use transliteration_port::MockTransliterationPort;
pub use transliteration_port::{Transliteration, TransliterationPort, TransliterationSource};
#[cfg(test)]
pub use voice_provider_port::MockVoiceProviderPort;
pub use voice_provider_port::VoiceProviderPort;
