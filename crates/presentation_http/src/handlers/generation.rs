//! Text-to-speech generation and transliteration

use application::{GenerationRequest, TransliterationResult, ports::TransliterationSource};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use domain::{GenerationJob, GenerationStatus, Language};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"text": "namaste duniya", "language": "hi"}))]
pub struct GenerateRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    /// Language code, `en` when absent
    #[serde(default)]
    pub language: Option<String>,
    /// Provider voice id; the configured default when absent
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerationJobResponse {
    pub id: String,
    /// First 100 characters of the input
    pub text: String,
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliterated_text: Option<String>,
    pub language: String,
    pub voice: String,
    /// queued, cleaning, transliterating, synthesizing, completed or failed
    pub status: String,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<GenerationJob> for GenerationJobResponse {
    fn from(job: GenerationJob) -> Self {
        Self {
            id: job.id.to_string(),
            text: job.text,
            original_text: job.original_text,
            cleaned_text: job.cleaned_text,
            transliterated_text: job.transliterated_text,
            language: job.language.code().to_string(),
            voice: job.voice,
            status: job.status.to_string(),
            progress: job.progress,
            audio_url: job.audio_url,
            error: job.error,
            created_at: job.created_at,
            completed_at: job.completed_at,
        }
    }
}

/// Run clean, transliterate and synthesize for one text
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Completed job", body = GenerationJobResponse),
        (status = 400, description = "Empty or oversized text, unknown language", body = crate::error::ErrorResponse),
        (status = 500, description = "A pipeline stage failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateRequest>,
) -> Result<Json<GenerationJobResponse>, ApiError> {
    let language = match request.language.as_deref() {
        Some(code) if !code.trim().is_empty() => code.trim().parse::<Language>()?,
        _ => Language::default(),
    };

    let job = state
        .generation
        .generate(GenerationRequest {
            text: request.text,
            language,
            voice: request.voice,
        })
        .await?;

    if job.status == GenerationStatus::Failed {
        return Err(ApiError::Failed {
            message: "Generation failed",
            code: "generation_failed",
            details: job.error.unwrap_or_default(),
        });
    }

    info!(job_id = %job.id, "Generation completed");
    Ok(Json(job.into()))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"text": "vanakkam", "language": "ta"}))]
pub struct TransliterateRequest {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransliterateResponse {
    pub original: String,
    pub transliterated: String,
    pub language: String,
    /// remote, fallback or passthrough
    pub source: String,
}

impl From<TransliterationResult> for TransliterateResponse {
    fn from(result: TransliterationResult) -> Self {
        Self {
            original: result.original,
            transliterated: result.transliterated,
            language: result.language,
            source: source_name(result.source).to_string(),
        }
    }
}

const fn source_name(source: TransliterationSource) -> &'static str {
    match source {
        TransliterationSource::Remote => "remote",
        TransliterationSource::Fallback => "fallback",
        TransliterationSource::Passthrough => "passthrough",
    }
}

/// Convert romanised text to native script
#[utoipa::path(
    post,
    path = "/api/transliterate",
    tag = "generation",
    request_body = TransliterateRequest,
    responses(
        (status = 200, description = "Transliterated text", body = TransliterateResponse),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(language = %request.language))]
pub async fn transliterate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TransliterateRequest>,
) -> Result<Json<TransliterateResponse>, ApiError> {
    let result = state
        .transliteration
        .transliterate(&request.text, request.language.trim())
        .await?;
    Ok(Json(result.into()))
}
