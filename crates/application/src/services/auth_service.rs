//! OAuth redirect and stored API-key sessions
//!
//! When encryption is enabled, `api_key` is sealed before it reaches the
//! store as `enc:v1:<base64(nonce || ciphertext)>` and opened again on the
//! way out. Callers always see plaintext. Rows without the prefix are
//! returned as stored.

use std::{fmt, sync::Arc};

use base64::{Engine, engine::general_purpose::STANDARD};
use domain::{ApiKeySession, NewApiKeySession, UserId};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ApiKeySessionStorePort, EncryptionPort, IdentityProviderPort},
};

/// Redirect target used when the caller gives none
pub const DEFAULT_REDIRECT_TO: &str = "http://localhost:3000";

/// Marker for sealed `api_key` values
pub const SEALED_PREFIX: &str = "enc:v1:";

const OAUTH_PROVIDER: &str = "google";

/// Service behind `/api/auth`
pub struct AuthService {
    identity: Arc<dyn IdentityProviderPort>,
    sessions: Arc<dyn ApiKeySessionStorePort>,
    encryption: Arc<dyn EncryptionPort>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("encryption_enabled", &self.encryption.is_enabled())
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        identity: Arc<dyn IdentityProviderPort>,
        sessions: Arc<dyn ApiKeySessionStorePort>,
        encryption: Arc<dyn EncryptionPort>,
    ) -> Self {
        Self {
            identity,
            sessions,
            encryption,
        }
    }

    /// URL to redirect the browser to for Google sign-in
    #[instrument(skip(self))]
    pub fn google_sign_in_url(&self, redirect_to: Option<&str>) -> Result<String, ApplicationError> {
        let redirect_to = redirect_to
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REDIRECT_TO);
        self.identity.authorize_url(OAUTH_PROVIDER, redirect_to)
    }

    /// Store a session row and return it with the plaintext key
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn store_session(
        &self,
        session: NewApiKeySession,
    ) -> Result<ApiKeySession, ApplicationError> {
        let plaintext = session.api_key.clone();
        let sealed = NewApiKeySession {
            api_key: self.seal(&plaintext)?,
            ..session
        };

        let mut stored = self.sessions.insert(&sealed).await?;
        stored.api_key = plaintext;
        debug!(sealed = self.encryption.is_enabled(), "Stored API-key session");
        Ok(stored)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_session(&self, user_id: &UserId) -> Result<ApiKeySession, ApplicationError> {
        let mut session = self
            .sessions
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Session not found".to_string()))?;
        session.api_key = self.open(&session.api_key)?;
        Ok(session)
    }

    fn seal(&self, api_key: &str) -> Result<String, ApplicationError> {
        if !self.encryption.is_enabled() {
            return Ok(api_key.to_string());
        }
        let sealed = self.encryption.encrypt(api_key.as_bytes())?;
        Ok(format!("{SEALED_PREFIX}{}", STANDARD.encode(sealed)))
    }

    fn open(&self, stored: &str) -> Result<String, ApplicationError> {
        let Some(encoded) = stored.strip_prefix(SEALED_PREFIX) else {
            return Ok(stored.to_string());
        };
        if !self.encryption.is_enabled() {
            warn!("Stored API key is sealed but no encryption key is configured");
            return Err(ApplicationError::Configuration(
                "session encryption key is required to read this session".to_string(),
            ));
        }

        let sealed = STANDARD
            .decode(encoded)
            .map_err(|e| ApplicationError::Internal(format!("Failed to decode base64: {e}")))?;
        let plain = self.encryption.decrypt(&sealed)?;
        String::from_utf8(plain).map_err(|e| {
            ApplicationError::Internal(format!("Decrypted data is not valid UTF-8: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{
        MockApiKeySessionStorePort, MockEncryptionPort, MockIdentityProviderPort, NoOpEncryption,
    };

    /// Reversible stand-in cipher
    fn xor_encryption() -> MockEncryptionPort {
        let mut enc = MockEncryptionPort::new();
        enc.expect_is_enabled().return_const(true);
        enc.expect_encrypt()
            .returning(|p| Ok(p.iter().map(|b| b ^ 0x5a).collect()));
        enc.expect_decrypt()
            .returning(|c| Ok(c.iter().map(|b| b ^ 0x5a).collect()));
        enc
    }

    fn echo_store(captured: Arc<Mutex<Option<String>>>) -> MockApiKeySessionStorePort {
        let mut store = MockApiKeySessionStorePort::new();
        let inserted = Arc::clone(&captured);
        store.expect_insert().returning(move |s| {
            *inserted.lock().unwrap() = Some(s.api_key.clone());
            Ok(ApiKeySession {
                id: Some("1".into()),
                user_id: s.user_id.clone(),
                api_key: s.api_key.clone(),
                provider: s.provider.clone(),
                created_at: None,
            })
        });
        store.expect_find_by_user().returning(move |user| {
            Ok(captured.lock().unwrap().clone().map(|key| ApiKeySession {
                id: Some("1".into()),
                user_id: user.clone(),
                api_key: key,
                provider: None,
                created_at: None,
            }))
        });
        store
    }

    fn service(
        store: MockApiKeySessionStorePort,
        encryption: Arc<dyn EncryptionPort>,
    ) -> AuthService {
        let mut identity = MockIdentityProviderPort::new();
        identity
            .expect_authorize_url()
            .returning(|provider, redirect| Ok(format!("https://idp/{provider}?to={redirect}")));
        AuthService::new(Arc::new(identity), Arc::new(store), encryption)
    }

    #[test]
    fn sign_in_defaults_redirect() {
        let svc = service(MockApiKeySessionStorePort::new(), Arc::new(NoOpEncryption));
        assert_eq!(
            svc.google_sign_in_url(None).unwrap(),
            "https://idp/google?to=http://localhost:3000"
        );
        assert_eq!(
            svc.google_sign_in_url(Some("https://app.example")).unwrap(),
            "https://idp/google?to=https://app.example"
        );
    }

    #[tokio::test]
    async fn api_key_round_trips_through_encryption() {
        let captured = Arc::new(Mutex::new(None));
        let svc = service(echo_store(Arc::clone(&captured)), Arc::new(xor_encryption()));

        let new = NewApiKeySession::new(Some("user-1"), Some("sk-live-123"), None).unwrap();
        let stored = svc.store_session(new).await.unwrap();
        assert_eq!(stored.api_key, "sk-live-123");

        let at_rest = captured.lock().unwrap().clone().unwrap();
        assert!(at_rest.starts_with(SEALED_PREFIX));
        assert!(!at_rest.contains("sk-live-123"));

        let fetched = svc
            .get_session(&UserId::parse("user-1").unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.api_key, "sk-live-123");
    }

    #[tokio::test]
    async fn without_encryption_key_is_stored_verbatim() {
        let captured = Arc::new(Mutex::new(None));
        let svc = service(echo_store(Arc::clone(&captured)), Arc::new(NoOpEncryption));

        let new = NewApiKeySession::new(Some("u"), Some("plain"), None).unwrap();
        svc.store_session(new).await.unwrap();
        assert_eq!(captured.lock().unwrap().as_deref(), Some("plain"));
    }

    #[tokio::test]
    async fn legacy_plaintext_rows_are_returned_verbatim() {
        let captured = Arc::new(Mutex::new(Some("legacy-key".to_string())));
        let svc = service(echo_store(captured), Arc::new(xor_encryption()));

        let fetched = svc.get_session(&UserId::parse("u").unwrap()).await.unwrap();
        assert_eq!(fetched.api_key, "legacy-key");
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let mut store = MockApiKeySessionStorePort::new();
        store.expect_find_by_user().returning(|_| Ok(None));
        let svc = service(store, Arc::new(NoOpEncryption));

        let err = svc
            .get_session(&UserId::parse("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }
}
