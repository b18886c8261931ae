//! Adapter tests against mocked provider APIs
//!
//! Each adapter is built from an `AppConfig` loaded the same way the server
//! loads it, then exercised through its application port.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{collections::HashMap, io::Write, path::Path};

use application::{
    error::ApplicationError,
    ports::{
        ApiKeySessionStorePort, AudioSource, DatabaseHealthPort, IdentityProviderPort,
        TodoStorePort, TranscriptionPort, TransliterationPort, TransliterationSource,
        VoiceProviderPort,
    },
};
use domain::{Language, NewApiKeySession, TodoDraft, TodoId, UserId};
use infrastructure::{
    AppConfig, SpeechAdapter, SupabaseAdapter, TransliterationAdapter, VoiceAdapter,
};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Load configuration with every provider pointed at `server`
fn config_for(server: &MockServer) -> AppConfig {
    let vars: HashMap<String, String> = [
        ("SUPABASE_URL", server.uri()),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key".to_string()),
        ("OPENAI_API_KEY", "sk-test".to_string()),
        ("ELEVENLABS_API_KEY", "xi-test".to_string()),
        ("ECHO_FORGE_SPEECH__BASE_URL", server.uri()),
        ("ECHO_FORGE_VOICE__BASE_URL", server.uri()),
        ("ECHO_FORGE_TRANSLITERATION__BASE_URL", server.uri()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    AppConfig::load_from(Path::new("/nonexistent/echo-forge/config"), vars)
        .expect("config should load")
}

fn supabase(config: &AppConfig) -> SupabaseAdapter {
    SupabaseAdapter::new(config.supabase.to_supabase_config()).expect("supabase adapter")
}

fn audio(bytes: &[u8], filename: &str, mime: &str) -> (NamedTempFile, AudioSource) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    let source = AudioSource {
        path: file.path().to_path_buf(),
        filename: filename.to_string(),
        content_type: mime.to_string(),
    };
    (file, source)
}

fn todo_row(id: u64, title: &str, done: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "is_complete": done,
        "created_at": "2024-05-01T10:00:00+00:00"
    })
}

// ============ Supabase ============

mod supabase_tests {
    use super::*;

    #[tokio::test]
    async fn todo_writes_carry_service_key_and_return_rows() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/todos"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer service-key"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([{"title": "Record intro", "is_complete": false}])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([todo_row(
                1,
                "Record intro",
                false
            )])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/todos"))
            .and(query_param("id", "eq.1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([todo_row(1, "Record intro", true)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = supabase(&config_for(&server));

        let created = adapter
            .create(&TodoDraft::new("Record intro", false))
            .await
            .unwrap();
        assert_eq!(created.id.as_str(), "1");

        let updated = adapter
            .update(&created.id, &TodoDraft::new("Record intro", true))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_complete);
    }

    #[tokio::test]
    async fn malformed_ids_read_as_missing() {
        let server = MockServer::start().await;

        Mock::given(path("/rest/v1/todos"))
            .and(query_param("id", "eq.not-a-number"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "22P02",
                "message": "invalid input syntax for type bigint: \"not-a-number\""
            })))
            .mount(&server)
            .await;

        let adapter = supabase(&config_for(&server));
        let id = TodoId::new("not-a-number");

        assert!(adapter.get(&id).await.unwrap().is_none());
        assert!(
            adapter
                .update(&id, &TodoDraft::new("x", true))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!adapter.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn other_database_errors_are_upstream_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/todos"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let adapter = supabase(&config_for(&server));

        let err = adapter.list().await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(ref m) if m.contains("Invalid API key")));
        assert!(!adapter.is_available().await);
    }

    #[tokio::test]
    async fn sessions_are_stored_per_user() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/user_api_keys"))
            .and(body_json(json!([{"user_id": "user-1", "api_key": "enc:v1:abc", "provider": "openai"}])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": "9f1c",
                "user_id": "user-1",
                "api_key": "enc:v1:abc",
                "provider": "openai",
                "created_at": "2024-05-01T10:00:00+00:00"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/user_api_keys"))
            .and(query_param("user_id", "eq.user-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let adapter = supabase(&config_for(&server));

        let session = NewApiKeySession::new(
            Some("user-1"),
            Some("enc:v1:abc"),
            Some("openai".to_string()),
        )
        .unwrap();
        let stored = adapter.insert(&session).await.unwrap();
        assert_eq!(stored.id.as_deref(), Some("9f1c"));
        assert_eq!(stored.user_id.as_str(), "user-1");

        let missing = adapter
            .find_by_user(&UserId::parse("user-2").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn sign_in_url_points_at_project() {
        let server = MockServer::start().await;
        let adapter = supabase(&config_for(&server));

        let url = adapter
            .authorize_url("google", "http://localhost:3000")
            .unwrap();
        assert!(url.starts_with(&format!("{}/auth/v1/authorize?", server.uri())));
        assert!(url.contains("provider=google"));
    }

    #[tokio::test]
    async fn missing_project_url_is_configuration_error() {
        let adapter = SupabaseAdapter::new(AppConfig::default().supabase.to_supabase_config())
            .expect("adapter builds without a project");

        assert!(matches!(
            adapter.list().await,
            Err(ApplicationError::Configuration(_))
        ));
        assert!(!adapter.is_available().await);
    }
}

// ============ Speech ============

mod speech_tests {
    use super::*;

    #[tokio::test]
    async fn transcription_uses_configured_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_string_contains("filename=\"memo.m4a\""))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello world\n"))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let adapter = SpeechAdapter::new(config.speech.to_openai_config()).unwrap();
        let (_guard, source) = audio(b"m4a-bytes", "memo.m4a", "audio/mp4");

        assert!(adapter.is_configured());
        assert_eq!(adapter.transcribe(&source).await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn provider_refusal_is_an_upstream_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "Invalid file format."}
            })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let adapter = SpeechAdapter::new(config.speech.to_openai_config()).unwrap();
        let (_guard, source) = audio(b"nope", "memo.bin", "audio/x-unknown");

        let err = adapter.transcribe(&source).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(ref m) if m == "Invalid file format."));
    }

    #[tokio::test]
    async fn missing_key_is_configuration_error() {
        let adapter = SpeechAdapter::new(AppConfig::default().speech.to_openai_config()).unwrap();
        let (_guard, source) = audio(b"ID3", "a.mp3", "audio/mpeg");

        assert!(!adapter.is_configured());
        let err = adapter.transcribe(&source).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(ref m) if m.contains("API key")));
    }
}

// ============ Voice ============

mod voice_tests {
    use super::*;

    #[tokio::test]
    async fn clone_then_synthesize() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/voices/add"))
            .and(header("xi-api-key", "xi-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"voice_id": "v-7"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/text-to-speech/v-7"))
            .and(body_string_contains("\"text\":\"Hello\""))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3-mp3".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let adapter = VoiceAdapter::new(config.voice.to_elevenlabs_config()).unwrap();
        let (_guard, sample) = audio(b"RIFF....WAVE", "sample.wav", "audio/wav");

        let voice_id = adapter
            .clone_voice("voice_clone_1", "Cloned voice", &sample)
            .await
            .unwrap();
        let audio = adapter.synthesize(&voice_id, "Hello").await.unwrap();
        assert_eq!(audio, b"ID3-mp3");
    }

    #[tokio::test]
    async fn provider_refusal_is_rejected_input() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/voices/add"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": {"status": "invalid_sample", "message": "Sample is too short."}
            })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let adapter = VoiceAdapter::new(config.voice.to_elevenlabs_config()).unwrap();
        let (_guard, sample) = audio(b"RIFF", "short.wav", "audio/wav");

        let err = adapter
            .clone_voice("voice_clone_2", "Cloned voice", &sample)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Rejected(ref m) if m == "Sample is too short."));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn library_and_delete() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/voices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "voices": [{"voice_id": "a", "name": "Rachel", "category": "premade"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/voices/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let adapter = VoiceAdapter::new(config.voice.to_elevenlabs_config()).unwrap();

        let voices = adapter.list_voices().await.unwrap();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].name, "Rachel");
        adapter.delete_voice("a").await.unwrap();
    }
}

// ============ Transliteration ============

mod transliteration_tests {
    use super::*;

    #[tokio::test]
    async fn each_word_is_sent_separately() {
        let server = MockServer::start().await;

        for (word, native) in [("namaste", "नमस्ते"), ("duniya", "दुनिया")] {
            Mock::given(method("GET"))
                .and(path("/request"))
                .and(query_param("text", word))
                .and(query_param("itc", "hi-t-i0-und"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    "SUCCESS",
                    [[word, [native], [], {"candidate_type": [0]}]]
                ])))
                .expect(1)
                .mount(&server)
                .await;
        }

        let config = config_for(&server);
        let adapter = TransliterationAdapter::new(config.transliteration.clone()).unwrap();

        let result = adapter
            .transliterate("namaste duniya", Language::Hindi)
            .await
            .unwrap();
        assert_eq!(result.text, "नमस्ते दुनिया");
        assert_eq!(result.source, TransliterationSource::Remote);
    }
}
