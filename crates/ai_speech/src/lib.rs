//! AI Speech - hosted speech provider clients
//!
//! Provides traits and implementations for the two speech services the
//! server relies on:
//! - `SpeechToText` - transcribe an audio file to plain text (OpenAI Whisper)
//! - `VoiceCloning` - register voices from samples and synthesize speech
//!   with them (ElevenLabs)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioFile, OpenAiSpeechConfig, OpenAiWhisperProvider, SpeechToText};
//!
//! let provider = OpenAiWhisperProvider::new(OpenAiSpeechConfig::default())?;
//! let text = provider
//!     .transcribe_file(&AudioFile::new("uploads/audio/a.mp3", "a.mp3", "audio/mpeg"))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{ElevenLabsConfig, OpenAiSpeechConfig};
pub use error::SpeechError;
pub use ports::{SpeechToText, VoiceCloning};
pub use providers::{elevenlabs::ElevenLabsProvider, openai::OpenAiWhisperProvider};
pub use types::{AudioFile, VoiceInfo, VoiceSettings};
