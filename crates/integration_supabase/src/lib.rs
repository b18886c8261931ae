//! Supabase integration
//!
//! Thin client for a Supabase project: PostgREST table access under
//! `/rest/v1` and the GoTrue OAuth entry point under `/auth/v1`.

pub mod client;
mod models;

pub use client::{Filter, PostgrestClient, SupabaseClient, SupabaseConfig, SupabaseError};
pub use models::{ApiKeyRow, ApiKeyWrite, TodoRow, TodoWrite};
