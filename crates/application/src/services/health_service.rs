//! Readiness aggregation

use std::{fmt, sync::Arc, time::Duration};

use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{DatabaseHealthPort, TranscriptionPort};

/// Default timeout for the database probe in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Database probe result
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatabaseStatus {
    pub healthy: bool,
}

/// Transcription provider credential check
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TranscriptionStatus {
    pub configured: bool,
}

/// Readiness of the server's dependencies
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub database: DatabaseStatus,
    pub transcription: TranscriptionStatus,
}

/// Service behind `/ready`
pub struct HealthService {
    database: Arc<dyn DatabaseHealthPort>,
    transcription: Arc<dyn TranscriptionPort>,
    timeout: Duration,
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(
        database: Arc<dyn DatabaseHealthPort>,
        transcription: Arc<dyn TranscriptionPort>,
    ) -> Self {
        Self {
            database,
            transcription,
            timeout: Duration::from_secs(DEFAULT_HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ready when the database answers within the timeout
    ///
    /// A missing transcription key is reported but does not make the server
    /// unready; only `/api/transcribe` depends on it.
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessReport {
        let healthy = if let Ok(available) = timeout(self.timeout, self.database.is_available()).await {
            available
        } else {
            warn!(timeout = ?self.timeout, "Database health check timed out");
            false
        };
        let configured = self.transcription.is_configured();
        debug!(database = healthy, transcription = configured, "Readiness checked");

        ReadinessReport {
            ready: healthy,
            database: DatabaseStatus { healthy },
            transcription: TranscriptionStatus { configured },
        }
    }
}
