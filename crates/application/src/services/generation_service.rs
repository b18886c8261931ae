//! Text-to-speech generation pipeline
//!
//! Runs clean → transliterate → synthesize for one job, advancing the job's
//! state only after each stage has produced its output.

use std::{fmt, sync::Arc};

use domain::{GenerationJob, Language, clean_text};
use tracing::{info, instrument, warn};

use super::{audio_store::GeneratedAudioStore, transliteration_service::TransliterationService};
use crate::{error::ApplicationError, ports::VoiceProviderPort};

/// Input for one generation run
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub language: Language,
    /// Provider voice id; the configured default when absent
    pub voice: Option<String>,
}

/// Service behind `/api/generate`
pub struct GenerationService {
    transliteration: Arc<TransliterationService>,
    voice: Arc<dyn VoiceProviderPort>,
    audio_store: GeneratedAudioStore,
    default_voice: String,
}

impl fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationService")
            .field("audio_store", &self.audio_store)
            .field("default_voice", &self.default_voice)
            .finish_non_exhaustive()
    }
}

impl GenerationService {
    pub fn new(
        transliteration: Arc<TransliterationService>,
        voice: Arc<dyn VoiceProviderPort>,
        audio_store: GeneratedAudioStore,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            transliteration,
            voice,
            audio_store,
            default_voice: default_voice.into(),
        }
    }

    /// Run the whole pipeline
    ///
    /// Invalid input is an error. Once the job exists, a failing stage is
    /// recorded on the job (status `failed`) and the job is returned.
    #[instrument(skip(self, request), fields(language = %request.language))]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationJob, ApplicationError> {
        let voice = request
            .voice
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.default_voice.clone());
        let mut job = GenerationJob::new(&request.text, request.language, voice)?;
        info!(job_id = %job.id, "Generation job queued");

        if let Err(e) = self.run(&mut job).await {
            warn!(job_id = %job.id, status = %job.status, error = %e, "Generation failed");
            job.fail(e.to_string())?;
        }
        Ok(job)
    }

    async fn run(&self, job: &mut GenerationJob) -> Result<(), ApplicationError> {
        job.start_cleaning()?;
        let cleaned = clean_text(&job.original_text);
        job.finish_cleaning(cleaned.clone())?;

        job.start_transliterating()?;
        let transliterated = self
            .transliteration
            .transliterate(&cleaned, job.language.code())
            .await?;
        job.finish_transliterating(transliterated.transliterated)?;

        job.start_synthesizing()?;
        let text = job.speech_text().unwrap_or_default().to_string();
        let audio = self.voice.synthesize(&job.voice, &text).await?;
        let saved = self.audio_store.save(&audio).await?;

        job.complete(saved.url)?;
        info!(job_id = %job.id, file = %saved.filename, "Generation completed");
        Ok(())
    }
}
