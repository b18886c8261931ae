//! Adapters implementing application ports

mod encryption_adapter;
mod speech_adapter;
mod supabase_adapter;
mod transliteration_adapter;
mod voice_adapter;

pub use encryption_adapter::{ChaChaEncryptionAdapter, KEY_SIZE};
pub use speech_adapter::SpeechAdapter;
pub use supabase_adapter::SupabaseAdapter;
pub use transliteration_adapter::TransliterationAdapter;
pub use voice_adapter::VoiceAdapter;
