//! Encryption port - sealing credentials before they reach the store

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for symmetric authenticated encryption
#[cfg_attr(test, automock)]
pub trait EncryptionPort: Send + Sync {
    /// Encrypt plaintext; the output carries its own nonce
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, ApplicationError>;

    /// Decrypt output produced by [`EncryptionPort::encrypt`]
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, ApplicationError>;

    /// Whether values are actually transformed
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Pass-through used when no key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEncryption;

impl EncryptionPort for NoOpEncryption {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, ApplicationError> {
        Ok(plaintext.to_vec())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, ApplicationError> {
        Ok(ciphertext.to_vec())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_encryption_passthrough() {
        let encryption = NoOpEncryption;
        let sealed = encryption.encrypt(b"sk-test").unwrap();
        assert_eq!(sealed, b"sk-test");
        assert_eq!(encryption.decrypt(&sealed).unwrap(), b"sk-test");
        assert!(!encryption.is_enabled());
    }
}
