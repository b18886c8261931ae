//! HTTP request handlers

mod form;

pub mod auth;
pub mod generation;
pub mod health;
pub mod todos;
pub mod transcription;
pub mod voices;
