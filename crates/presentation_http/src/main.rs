//! Echo Forge HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::ports::{EncryptionPort, NoOpEncryption};
use infrastructure::{
    AppConfig, ChaChaEncryptionAdapter, SecurityValidator, SpeechAdapter, SupabaseAdapter,
    TransliterationAdapter, VoiceAdapter, init_from_config,
};
use presentation_http::{AppState, ServicePorts, cors_layer, create_router};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_from_config(&config.server).context("Failed to initialize logging")?;

    info!("🎙️ Echo Forge v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }
    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        "Configuration loaded"
    );

    SecurityValidator::log_warnings(&SecurityValidator::validate(&config));

    let ports = build_ports(&config)?;
    let state = AppState::new(config.clone(), ports);
    let app = create_router(state).layer(cors_layer(&config.server));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/api-docs", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Build every outbound adapter from configuration
fn build_ports(config: &AppConfig) -> anyhow::Result<ServicePorts> {
    let supabase = Arc::new(
        SupabaseAdapter::new(config.supabase.to_supabase_config())
            .context("Failed to initialize database client")?,
    );
    let speech = Arc::new(
        SpeechAdapter::new(config.speech.to_openai_config())
            .context("Failed to initialize transcription client")?,
    );
    let voice = Arc::new(
        VoiceAdapter::new(config.voice.to_elevenlabs_config())
            .context("Failed to initialize voice client")?,
    );
    let transliteration = Arc::new(
        TransliterationAdapter::new(config.transliteration.clone())
            .context("Failed to initialize transliteration client")?,
    );

    let encryption: Arc<dyn EncryptionPort> =
        match ChaChaEncryptionAdapter::from_config(&config.security)
            .context("Invalid session encryption key")?
        {
            Some(adapter) => {
                info!("🔐 Stored API keys are encrypted");
                Arc::new(adapter)
            },
            None => {
                warn!("Stored API keys are NOT encrypted; set security.session_encryption_key");
                Arc::new(NoOpEncryption)
            },
        };

    Ok(ServicePorts {
        todos: Arc::clone(&supabase) as _,
        sessions: Arc::clone(&supabase) as _,
        identity: Arc::clone(&supabase) as _,
        encryption,
        database: supabase,
        transcription: speech,
        transliteration,
        voice,
    })
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
