//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{
    AuthService, GeneratedAudioStore, GenerationService, HealthService, TodoService,
    TranscriptionService, TransliterationService, VoiceCloneService,
    ports::{
        ApiKeySessionStorePort, DatabaseHealthPort, EncryptionPort, IdentityProviderPort,
        TodoStorePort, TranscriptionPort, TransliterationPort, VoiceProviderPort,
    },
};
use domain::AudioUploadPolicy;
use infrastructure::AppConfig;

/// Outbound ports the services are built from
///
/// The binary fills these with infrastructure adapters; tests use fakes.
pub struct ServicePorts {
    pub todos: Arc<dyn TodoStorePort>,
    pub sessions: Arc<dyn ApiKeySessionStorePort>,
    pub identity: Arc<dyn IdentityProviderPort>,
    pub encryption: Arc<dyn EncryptionPort>,
    pub database: Arc<dyn DatabaseHealthPort>,
    pub transcription: Arc<dyn TranscriptionPort>,
    pub transliteration: Arc<dyn TransliterationPort>,
    pub voice: Arc<dyn VoiceProviderPort>,
}

impl fmt::Debug for ServicePorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePorts")
            .field("encryption_enabled", &self.encryption.is_enabled())
            .finish_non_exhaustive()
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub todos: Arc<TodoService>,
    pub auth: Arc<AuthService>,
    pub transcription: Arc<TranscriptionService>,
    pub transliteration: Arc<TransliterationService>,
    pub generation: Arc<GenerationService>,
    pub voices: Arc<VoiceCloneService>,
    pub health: Arc<HealthService>,
    /// Synthesized audio served by `/api/download`
    pub audio_store: GeneratedAudioStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire every service from its ports and the storage settings
    pub fn new(config: AppConfig, ports: ServicePorts) -> Self {
        let storage = &config.storage;
        let audio_store = GeneratedAudioStore::new(&storage.output_dir);

        let transliteration = Arc::new(TransliterationService::new(ports.transliteration));
        let generation = GenerationService::new(
            Arc::clone(&transliteration),
            Arc::clone(&ports.voice),
            audio_store.clone(),
            config.voice.default_voice_id.clone(),
        );
        let transcription =
            TranscriptionService::new(Arc::clone(&ports.transcription), &storage.upload_dir)
                .with_policy(
                    AudioUploadPolicy::transcription()
                        .with_max_bytes(storage.max_transcription_bytes),
                );
        let voices = VoiceCloneService::new(ports.voice, &storage.upload_dir, audio_store.clone())
            .with_policy(
                AudioUploadPolicy::voice_sample().with_max_bytes(storage.max_voice_sample_bytes),
            );

        Self {
            todos: Arc::new(TodoService::new(ports.todos)),
            auth: Arc::new(AuthService::new(
                ports.identity,
                ports.sessions,
                ports.encryption,
            )),
            transcription: Arc::new(transcription),
            transliteration,
            generation: Arc::new(generation),
            voices: Arc::new(voices),
            health: Arc::new(HealthService::new(ports.database, ports.transcription)),
            audio_store,
            config: Arc::new(config),
        }
    }
}
