//! Stored user API-key session records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::UserId};

/// A stored association between a user, a provider and a credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeySession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: UserId,
    pub api_key: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for ApiKeySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeySession")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("api_key", &"[REDACTED]")
            .field("provider", &self.provider)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A session record that has not been stored yet
#[derive(Clone, PartialEq, Eq)]
pub struct NewApiKeySession {
    pub user_id: UserId,
    pub api_key: String,
    pub provider: Option<String>,
}

impl NewApiKeySession {
    /// Build a new record, requiring non-empty `user_id` and `api_key`
    pub fn new(
        user_id: Option<&str>,
        api_key: Option<&str>,
        provider: Option<String>,
    ) -> Result<Self, DomainError> {
        let (Some(user_id), Some(api_key)) = (user_id, api_key) else {
            return Err(Self::missing());
        };
        if user_id.is_empty() || api_key.is_empty() {
            return Err(Self::missing());
        }

        Ok(Self {
            user_id: UserId::parse(user_id).map_err(|_| Self::missing())?,
            api_key: api_key.to_string(),
            provider,
        })
    }

    fn missing() -> DomainError {
        DomainError::MissingField("user_id and api_key are required".to_string())
    }
}

impl fmt::Debug for NewApiKeySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewApiKeySession")
            .field("user_id", &self.user_id)
            .field("api_key", &"[REDACTED]")
            .field("provider", &self.provider)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_user_id_and_api_key() {
        assert!(NewApiKeySession::new(None, Some("k"), None).is_err());
        assert!(NewApiKeySession::new(Some("u"), None, None).is_err());
        assert!(NewApiKeySession::new(Some(""), Some("k"), None).is_err());
        assert!(NewApiKeySession::new(Some("u"), Some(""), None).is_err());
    }

    #[test]
    fn missing_fields_message() {
        let err = NewApiKeySession::new(None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "user_id and api_key are required");
    }

    #[test]
    fn provider_is_kept_verbatim() {
        let session = NewApiKeySession::new(Some("u"), Some("k"), Some(String::new())).unwrap();
        assert_eq!(session.provider.as_deref(), Some(""));

        let session = NewApiKeySession::new(Some("u"), Some("k"), None).unwrap();
        assert!(session.provider.is_none());

        let session =
            NewApiKeySession::new(Some("u"), Some("k"), Some("elevenlabs".to_string())).unwrap();
        assert_eq!(session.provider.as_deref(), Some("elevenlabs"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let session = NewApiKeySession::new(Some("u"), Some("sk-secret"), None).unwrap();
        let debug = format!("{session:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn stored_session_deserializes_without_optional_columns() {
        let json = r#"{"user_id":"u1","api_key":"k","provider":null}"#;
        let session: ApiKeySession = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id.as_str(), "u1");
        assert!(session.id.is_none());
        assert!(session.created_at.is_none());
    }
}
