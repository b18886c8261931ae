//! User identifier value object
//!
//! User IDs are issued by the identity provider and are opaque to Echo Forge,
//! so the only invariant enforced here is that the identifier is non-empty.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An identity-provider user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse a user ID, rejecting empty or whitespace-only input
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "user_id must not be empty".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_can_be_parsed() {
        let id = UserId::parse("4f1c2b7e-user").unwrap();
        assert_eq!(id.as_str(), "4f1c2b7e-user");
        assert_eq!(id.to_string(), "4f1c2b7e-user");
    }

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = UserId::parse("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
