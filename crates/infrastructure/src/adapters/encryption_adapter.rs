//! XChaCha20-Poly1305 sealing of stored API keys
//!
//! Output layout is `nonce (24 bytes) || ciphertext || tag`.

use application::{error::ApplicationError, ports::EncryptionPort};
use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, AeadCore, KeyInit, OsRng, rand_core::RngCore},
};
use tracing::{debug, instrument, warn};

use crate::config::SecurityConfig;

const NONCE_SIZE: usize = 24;

/// Key size in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

pub struct ChaChaEncryptionAdapter {
    cipher: XChaCha20Poly1305,
}

impl std::fmt::Debug for ChaChaEncryptionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaChaEncryptionAdapter")
            .field("cipher", &"[XChaCha20Poly1305]")
            .finish()
    }
}

impl ChaChaEncryptionAdapter {
    /// # Errors
    ///
    /// Returns an error if the key is not exactly 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, ApplicationError> {
        if key.len() != KEY_SIZE {
            return Err(ApplicationError::Configuration(format!(
                "Encryption key must be {KEY_SIZE} bytes, got {}",
                key.len()
            )));
        }

        let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|e| {
            ApplicationError::Configuration(format!("Invalid encryption key: {e}"))
        })?;

        debug!("Initialized session key encryption");
        Ok(Self { cipher })
    }

    /// Build from `security.session_encryption_key`
    ///
    /// Returns `Ok(None)` when no key is configured.
    pub fn from_config(config: &SecurityConfig) -> Result<Option<Self>, ApplicationError> {
        let key = config.session_key_bytes().map_err(|e| {
            ApplicationError::Configuration(format!("Session encryption key is not base64: {e}"))
        })?;
        key.as_deref().map(Self::new).transpose()
    }

    /// Generate a new random key
    #[must_use]
    pub fn generate_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        key
    }
}

impl EncryptionPort for ChaChaEncryptionAdapter {
    #[instrument(skip_all, fields(plaintext_len = plaintext.len()))]
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, ApplicationError> {
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self.cipher.encrypt(&nonce, plaintext).map_err(|e| {
            warn!(error = %e, "Encryption failed");
            ApplicationError::Internal(format!("Encryption failed: {e}"))
        })?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    #[instrument(skip_all, fields(ciphertext_len = ciphertext.len()))]
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, ApplicationError> {
        if ciphertext.len() < NONCE_SIZE {
            return Err(ApplicationError::Internal(
                "Ciphertext too short - missing nonce".to_string(),
            ));
        }

        let (nonce, encrypted) = ciphertext.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(XNonce::from_slice(nonce), encrypted)
            .map_err(|e| {
                warn!(error = %e, "Decryption failed - data may be corrupted or key mismatch");
                ApplicationError::Internal(format!("Decryption failed: {e}"))
            })
    }
}
