//! Voice cloning, the provider's voice library and generated audio download

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
};
use domain::VoiceSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::form::UploadForm;
use crate::{error::ApiError, state::AppState};

pub const TEXT_FIELD: &str = "text";
pub const SAMPLE_FIELD: &str = "voice_sample";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceCloneResponse {
    pub message: String,
    /// `success` or `error`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Only for the OpenAPI document
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct VoiceCloneUpload {
    /// Text to speak with the cloned voice
    pub text: String,
    /// WAV, MP3 or WebM sample, at most 15 MB
    #[schema(value_type = String, format = Binary)]
    pub voice_sample: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceResponse {
    pub voice_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl From<VoiceSummary> for VoiceResponse {
    fn from(voice: VoiceSummary) -> Self {
        Self {
            voice_id: voice.voice_id,
            name: voice.name,
            category: voice.category,
            description: voice.description,
            preview_url: voice.preview_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Clone a voice from a sample and speak the given text with it
#[utoipa::path(
    post,
    path = "/api/clone-voice",
    tag = "voices",
    request_body(content = VoiceCloneUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Voice cloned and speech generated", body = VoiceCloneResponse),
        (status = 400, description = "Invalid text or sample, or refused by the provider", body = crate::error::ErrorResponse),
        (status = 500, description = "Provider unreachable or not configured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn clone_voice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VoiceCloneResponse>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let text = form
        .text(TEXT_FIELD)
        .ok_or_else(|| ApiError::BadRequest("Text input cannot be empty".to_string()))?
        .to_string();
    let sample = form
        .take_file(SAMPLE_FIELD)
        .ok_or_else(|| ApiError::BadRequest("No voice sample provided".to_string()))?;

    let outcome = state.voices.clone_and_speak(&text, &sample).await?;
    info!(voice_id = %outcome.voice_id, file = %outcome.audio.filename, "Cloned voice spoke text");

    Ok(Json(VoiceCloneResponse {
        message: "Voice cloned and speech generated successfully".to_string(),
        status: "success".to_string(),
        audio_url: Some(outcome.audio.url),
        voice_id: Some(outcome.voice_id),
        error: None,
    }))
}

/// Voices available at the provider
#[utoipa::path(
    get,
    path = "/api/voices",
    tag = "voices",
    responses(
        (status = 200, description = "Provider voices", body = VoiceListResponse),
        (status = 500, description = "Provider unreachable or not configured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_voices(State(state): State<AppState>) -> Result<Json<VoiceListResponse>, ApiError> {
    let voices = state.voices.list_voices().await?;
    Ok(Json(VoiceListResponse {
        voices: voices.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/voices/{voice_id}",
    tag = "voices",
    params(("voice_id" = String, Path, description = "Provider voice ID")),
    responses(
        (status = 200, description = "Voice deleted", body = MessageResponse),
        (status = 400, description = "Refused by the provider", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_voice(
    State(state): State<AppState>,
    Path(voice_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.voices.delete_voice(&voice_id).await?;
    Ok(Json(MessageResponse {
        message: "Voice deleted successfully".to_string(),
    }))
}

/// Download a generated MP3
#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    tag = "voices",
    params(("filename" = String, Path, description = "Generated file name")),
    responses(
        (status = 200, description = "MP3 audio", content_type = "audio/mpeg", body = Vec<u8>),
        (status = 400, description = "Name contains a path", body = crate::error::ErrorResponse),
        (status = 404, description = "No such file", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state.audio_store.read(&filename).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        audio,
    ))
}
