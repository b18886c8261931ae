//! Value Objects - Immutable, identity-less domain primitives

mod audio_upload;
mod language;
mod todo_id;
mod user_id;

pub use audio_upload::{
    AllowedAudioTypes, AudioUploadPolicy, TRANSCRIPTION_MAX_BYTES, VOICE_SAMPLE_MAX_BYTES,
    VOICE_SAMPLE_TYPES,
};
pub use language::Language;
pub use todo_id::TodoId;
pub use user_id::UserId;
