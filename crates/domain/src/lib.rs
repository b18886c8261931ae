//! Domain layer for Echo Forge
//!
//! Contains core business logic, entities, value objects, and domain errors.
//! This layer has no I/O and defines the ubiquitous language: todos, API-key
//! sessions, transcriptions, generation jobs and audio uploads.

pub mod entities;
pub mod errors;
pub mod text;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use text::clean_text;
pub use value_objects::*;
