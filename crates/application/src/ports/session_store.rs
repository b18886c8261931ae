//! API-key session store port

use async_trait::async_trait;
use domain::{ApiKeySession, NewApiKeySession, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external `user_api_keys` table
///
/// The store sees `api_key` exactly as handed over, which may already be
/// sealed by the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeySessionStorePort: Send + Sync {
    /// Insert a row and return it as stored
    async fn insert(&self, session: &NewApiKeySession) -> Result<ApiKeySession, ApplicationError>;

    /// First row for the user, if any
    async fn find_by_user(&self, user_id: &UserId)
    -> Result<Option<ApiKeySession>, ApplicationError>;
}
