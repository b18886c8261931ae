//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
///
/// Request bodies are capped at the largest accepted upload plus framing;
/// anything bigger is answered with 413 before a handler runs.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.storage.max_body_bytes();

    Router::new()
        // Health
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Todos
        .route(
            "/api/todos",
            get(handlers::todos::list_todos).post(handlers::todos::create_todo),
        )
        .route(
            "/api/todos/{id}",
            get(handlers::todos::get_todo)
                .put(handlers::todos::update_todo)
                .delete(handlers::todos::delete_todo),
        )
        // Auth
        .route("/api/auth/google", get(handlers::auth::google_sign_in))
        .route("/api/auth/session", post(handlers::auth::store_session))
        .route(
            "/api/auth/session/{user_id}",
            get(handlers::auth::get_session),
        )
        // Transcription
        .route("/api/transcribe", post(handlers::transcription::transcribe))
        .route(
            "/api/transcribe/history",
            get(handlers::transcription::history),
        )
        // Generation
        .route("/api/generate", post(handlers::generation::generate))
        .route(
            "/api/transliterate",
            post(handlers::generation::transliterate),
        )
        // Voices
        .route("/api/clone-voice", post(handlers::voices::clone_voice))
        .route("/api/voices", get(handlers::voices::list_voices))
        .route(
            "/api/voices/{voice_id}",
            delete(handlers::voices::delete_voice),
        )
        .route(
            "/api/download/{filename}",
            get(handlers::voices::download),
        )
        // Docs
        .merge(openapi::create_openapi_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
        .with_state(state)
}

/// CORS policy for the browser client
///
/// No origins (or `*`) allows any origin; otherwise only the listed ones.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

