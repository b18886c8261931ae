//! Domain entities

mod api_key_session;
mod generation_job;
mod todo;
mod transcription;
mod voice;

pub use api_key_session::{ApiKeySession, NewApiKeySession};
pub use generation_job::{GenerationJob, GenerationStatus, MAX_GENERATION_TEXT_CHARS};
pub use todo::{Todo, TodoDraft};
pub use transcription::TranscriptionRecord;
pub use voice::{GeneratedAudio, VoiceCloneOutcome, VoiceSummary};
