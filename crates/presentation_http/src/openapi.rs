//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document with Swagger UI at `/api-docs` and ReDoc
//! at `/redoc`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Where the JSON document is served
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Echo Forge API",
        version = "0.1.0",
        description = "Voice cloning backend: todos, API-key sessions, transcription, transliteration and speech generation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "todos", description = "Todo records stored in the hosted database"),
        (name = "auth", description = "OAuth sign-in and stored API keys"),
        (name = "transcription", description = "Speech-to-text for uploaded audio"),
        (name = "generation", description = "Text cleaning, transliteration and speech synthesis"),
        (name = "voices", description = "Voice cloning and the provider voice library")
    ),
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::todos::list_todos,
        handlers::todos::get_todo,
        handlers::todos::create_todo,
        handlers::todos::update_todo,
        handlers::todos::delete_todo,
        handlers::auth::google_sign_in,
        handlers::auth::store_session,
        handlers::auth::get_session,
        handlers::transcription::transcribe,
        handlers::transcription::history,
        handlers::generation::generate,
        handlers::generation::transliterate,
        handlers::voices::clone_voice,
        handlers::voices::list_voices,
        handlers::voices::delete_voice,
        handlers::voices::download,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::DatabaseStatusResponse,
            handlers::health::TranscriptionStatusResponse,
            handlers::todos::TodoRequest,
            handlers::todos::TodoResponse,
            handlers::auth::SessionRequest,
            handlers::auth::SessionResponse,
            handlers::transcription::TranscriptionResponse,
            handlers::transcription::TranscriptionUpload,
            handlers::generation::GenerateRequest,
            handlers::generation::GenerationJobResponse,
            handlers::generation::TransliterateRequest,
            handlers::generation::TransliterateResponse,
            handlers::voices::VoiceCloneUpload,
            handlers::voices::VoiceCloneResponse,
            handlers::voices::VoiceResponse,
            handlers::voices::VoiceListResponse,
            handlers::voices::MessageResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Routes for `/api-docs`, `/api-docs/openapi.json` and `/redoc`
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url(OPENAPI_JSON_PATH, ApiDoc::openapi());

    Router::new()
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        .merge(SwaggerUi::new("/api-docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
