//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Plain-text banner served at `/`
pub const BANNER: &str = "Echo Forge API Server";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Server banner", body = String))
)]
pub async fn root() -> &'static str {
    BANNER
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: DatabaseStatusResponse,
    pub transcription: TranscriptionStatusResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseStatusResponse {
    pub healthy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptionStatusResponse {
    /// Whether a speech-to-text API key is set
    pub configured: bool,
}

/// Readiness check - can the database be reached?
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.health.readiness().await;

    let status_code = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: report.ready,
            database: DatabaseStatusResponse {
                healthy: report.database.healthy,
            },
            transcription: TranscriptionStatusResponse {
                configured: report.transcription.configured,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_crate_version() {
        let Json(resp) = health_check().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn root_returns_banner() {
        assert_eq!(root().await, "Echo Forge API Server");
    }

    #[test]
    fn readiness_response_shape() {
        let resp = ReadinessResponse {
            ready: false,
            database: DatabaseStatusResponse { healthy: false },
            transcription: TranscriptionStatusResponse { configured: true },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["database"]["healthy"], false);
        assert_eq!(json["transcription"]["configured"], true);
    }
}
