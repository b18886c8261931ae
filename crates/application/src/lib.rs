//! Application layer - Use cases and orchestration
//!
//! Defines the ports the outside world must implement (stores, speech and
//! voice providers, transliteration, encryption) and the services that drive
//! them for each HTTP use case.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
