//! Configuration validation module
//!
//! Startup checks for insecure or incomplete configuration.

pub mod security;

pub use security::{SecurityValidator, SecurityWarning, WarningSeverity};
