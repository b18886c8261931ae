//! OAuth sign-in relay and API-key session records

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::{ApiKeySession, NewApiKeySession, UserId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GoogleSignInQuery {
    /// Where the identity provider sends the browser afterwards
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Body of `POST /api/auth/session`
///
/// Both ids are optional at the JSON level so that a missing value yields
/// the same 400 as an empty one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"user_id": "a1b2c3", "api_key": "sk-...", "provider": "openai"}))]
pub struct SessionRequest {
    pub user_id: Option<String>,
    pub api_key: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ApiKeySession> for SessionResponse {
    fn from(session: ApiKeySession) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id.to_string(),
            api_key: session.api_key,
            provider: session.provider,
            created_at: session.created_at,
        }
    }
}

/// Start Google sign-in
#[utoipa::path(
    get,
    path = "/api/auth/google",
    tag = "auth",
    params(GoogleSignInQuery),
    responses(
        (status = 302, description = "Redirect to the identity provider"),
        (status = 500, description = "Identity provider not configured", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn google_sign_in(
    State(state): State<AppState>,
    Query(query): Query<GoogleSignInQuery>,
) -> Result<Response, ApiError> {
    let url = state.auth.google_sign_in_url(query.redirect_to.as_deref())?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// Store a user's API key
#[utoipa::path(
    post,
    path = "/api/auth/session",
    tag = "auth",
    request_body = SessionRequest,
    responses(
        (status = 201, description = "Session stored", body = SessionResponse),
        (status = 400, description = "user_id or api_key missing", body = crate::error::ErrorResponse),
        (status = 500, description = "Store error", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn store_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = NewApiKeySession::new(
        request.user_id.as_deref(),
        request.api_key.as_deref(),
        request.provider,
    )?;
    let stored = state.auth.store_session(session).await?;
    info!(user_id = %stored.user_id, "API key session stored");
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Fetch the stored API key of a user
#[utoipa::path(
    get,
    path = "/api/auth/session/{user_id}",
    tag = "auth",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Stored session", body = SessionResponse),
        (status = 404, description = "No session for this user", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    // a blank id can never have a session
    let user_id = UserId::parse(&user_id)
        .map_err(|_| ApiError::NotFound("Session not found".to_string()))?;
    let session = state.auth.get_session(&user_id).await?;
    Ok(Json(session.into()))
}
