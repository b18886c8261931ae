//! Supabase adapter - todos, API-key sessions, sign-in URLs and health
//!
//! One adapter implements every Supabase-backed port so the server holds a
//! single HTTP client for the project.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ApiKeySessionStorePort, DatabaseHealthPort, IdentityProviderPort, TodoStorePort},
};
use async_trait::async_trait;
use domain::{ApiKeySession, NewApiKeySession, Todo, TodoDraft, TodoId, UserId};
use integration_supabase::{
    ApiKeyRow, ApiKeyWrite, PostgrestClient, SupabaseClient, SupabaseConfig, SupabaseError,
    TodoRow, TodoWrite,
};
use tracing::{debug, instrument};

/// Adapter for the Supabase-backed ports
#[derive(Clone)]
pub struct SupabaseAdapter {
    client: Arc<dyn SupabaseClient>,
}

impl std::fmt::Debug for SupabaseAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAdapter").finish_non_exhaustive()
    }
}

impl SupabaseAdapter {
    /// Create an adapter over the PostgREST client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: SupabaseConfig) -> Result<Self, ApplicationError> {
        let client = PostgrestClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create with a custom client (for testing)
    pub fn with_client(client: Arc<dyn SupabaseClient>) -> Self {
        Self { client }
    }
}

fn map_error(err: SupabaseError) -> ApplicationError {
    match err {
        SupabaseError::Configuration(_) => ApplicationError::Configuration(err.to_string()),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

fn to_todo(row: TodoRow) -> Todo {
    Todo {
        id: TodoId::new(row.id),
        title: row.title,
        is_complete: row.is_complete,
        created_at: row.created_at,
    }
}

fn to_session(row: ApiKeyRow) -> Result<ApiKeySession, ApplicationError> {
    let user_id = UserId::parse(&row.user_id)
        .map_err(|e| ApplicationError::Internal(format!("Stored session is invalid: {e}")))?;
    Ok(ApiKeySession {
        id: row.id,
        user_id,
        api_key: row.api_key,
        provider: row.provider,
        created_at: row.created_at,
    })
}

fn todo_write(draft: &TodoDraft) -> TodoWrite<'_> {
    TodoWrite {
        title: draft.title.as_str(),
        is_complete: draft.is_complete,
    }
}

#[async_trait]
impl TodoStorePort for SupabaseAdapter {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Todo>, ApplicationError> {
        let rows = self.client.list_todos().await.map_err(map_error)?;
        debug!(count = rows.len(), "Listed todos");
        Ok(rows.into_iter().map(to_todo).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &TodoId) -> Result<Option<Todo>, ApplicationError> {
        let row = self.client.get_todo(id.as_str()).await.map_err(map_error)?;
        Ok(row.map(to_todo))
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, ApplicationError> {
        let row = self
            .client
            .insert_todo(&todo_write(draft))
            .await
            .map_err(map_error)?;
        Ok(to_todo(row))
    }

    #[instrument(skip(self, draft), fields(id = %id))]
    async fn update(
        &self,
        id: &TodoId,
        draft: &TodoDraft,
    ) -> Result<Option<Todo>, ApplicationError> {
        let row = self
            .client
            .update_todo(id.as_str(), &todo_write(draft))
            .await
            .map_err(map_error)?;
        Ok(row.map(to_todo))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &TodoId) -> Result<bool, ApplicationError> {
        self.client
            .delete_todo(id.as_str())
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl ApiKeySessionStorePort for SupabaseAdapter {
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn insert(&self, session: &NewApiKeySession) -> Result<ApiKeySession, ApplicationError> {
        let row = self
            .client
            .insert_api_key(&ApiKeyWrite {
                user_id: session.user_id.as_str(),
                api_key: &session.api_key,
                provider: session.provider.as_deref(),
            })
            .await
            .map_err(map_error)?;
        to_session(row)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ApiKeySession>, ApplicationError> {
        self.client
            .find_api_key(user_id.as_str())
            .await
            .map_err(map_error)?
            .map(to_session)
            .transpose()
    }
}

impl IdentityProviderPort for SupabaseAdapter {
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, ApplicationError> {
        self.client
            .authorize_url(provider, redirect_to)
            .map_err(map_error)
    }
}

#[async_trait]
impl DatabaseHealthPort for SupabaseAdapter {
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
