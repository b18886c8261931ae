//! Security configuration: encryption of stored API keys.

use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Security configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Base64 encoded 32-byte key used to seal stored API keys
    ///
    /// When absent, keys are stored as provided.
    #[serde(default, skip_serializing)]
    pub session_encryption_key: Option<SecretString>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field(
                "session_encryption_key",
                &self.session_encryption_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl SecurityConfig {
    /// Decode the session encryption key
    ///
    /// Returns `Ok(None)` when no key is configured.
    pub fn session_key_bytes(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        self.session_encryption_key
            .as_ref()
            .map(|key| STANDARD.decode(key.expose_secret().trim()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_decodes_to_none() {
        assert_eq!(SecurityConfig::default().session_key_bytes().unwrap(), None);
    }

    #[test]
    fn key_is_base64_decoded() {
        let config = SecurityConfig {
            session_encryption_key: Some(SecretString::from(STANDARD.encode([7u8; 32]))),
        };
        assert_eq!(config.session_key_bytes().unwrap(), Some(vec![7u8; 32]));
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let config = SecurityConfig {
            session_encryption_key: Some(SecretString::from("not base64!".to_string())),
        };
        assert!(config.session_key_bytes().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let config = SecurityConfig {
            session_encryption_key: Some(SecretString::from("c2VjcmV0".to_string())),
        };
        assert!(!format!("{config:?}").contains("c2VjcmV0"));
    }
}
