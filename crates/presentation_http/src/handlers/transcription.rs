//! Audio transcription upload

use axum::{Json, extract::Multipart, extract::State};
use chrono::{DateTime, Utc};
use domain::TranscriptionRecord;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::form::UploadForm;
use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the audio file
pub const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "1718000000000",
    "text": "hello world",
    "duration": 0,
    "filename": "clip.mp3",
    "timestamp": "2024-06-10T08:00:00Z"
}))]
pub struct TranscriptionResponse {
    pub id: String,
    pub text: String,
    /// Always 0; the provider does not report it for plain-text output
    pub duration: f64,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
}

impl From<TranscriptionRecord> for TranscriptionResponse {
    fn from(record: TranscriptionRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            duration: record.duration,
            filename: record.filename,
            timestamp: record.timestamp,
        }
    }
}

/// Only for the OpenAPI document
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct TranscriptionUpload {
    #[schema(value_type = String, format = Binary)]
    pub audio: Vec<u8>,
}

/// Transcribe one uploaded audio file
#[utoipa::path(
    post,
    path = "/api/transcribe",
    tag = "transcription",
    request_body(content = TranscriptionUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcribed text", body = TranscriptionResponse),
        (status = 400, description = "Missing, non-audio or oversized file", body = crate::error::ErrorResponse),
        (status = 413, description = "Request body over the server limit", body = crate::error::ErrorResponse),
        (status = 500, description = "Transcription failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let upload = form
        .take_file(AUDIO_FIELD)
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;

    let record = state
        .transcription
        .transcribe(&upload)
        .await
        .map_err(|e| ApiError::failed("Transcription failed", "transcription_failed", e))?;

    Ok(Json(record.into()))
}

/// Past transcriptions; always empty
#[utoipa::path(
    get,
    path = "/api/transcribe/history",
    tag = "transcription",
    responses((status = 200, description = "Transcription history", body = Vec<TranscriptionResponse>))
)]
pub async fn history(State(state): State<AppState>) -> Json<Vec<TranscriptionResponse>> {
    Json(
        state
            .transcription
            .history()
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}
