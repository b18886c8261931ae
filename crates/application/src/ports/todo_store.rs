//! Todo store port

use async_trait::async_trait;
use domain::{Todo, TodoDraft, TodoId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external `todos` table
///
/// Lookups that match no row return `None`/`false` rather than an error so
/// callers can tell "absent" apart from store failures.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TodoStorePort: Send + Sync {
    /// All todos in store order
    async fn list(&self) -> Result<Vec<Todo>, ApplicationError>;

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>, ApplicationError>;

    /// Insert a todo; the store assigns `id` and `created_at`
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, ApplicationError>;

    async fn update(&self, id: &TodoId, draft: &TodoDraft)
    -> Result<Option<Todo>, ApplicationError>;

    /// Delete a todo, returning whether a row was removed
    async fn delete(&self, id: &TodoId) -> Result<bool, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn TodoStorePort) {}
}
