//! Todo CRUD over the external store

use std::{fmt, sync::Arc};

use domain::{Todo, TodoDraft, TodoId};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::TodoStorePort};

const NOT_FOUND: &str = "Todo not found";

/// Service for the five todo operations
pub struct TodoService {
    store: Arc<dyn TodoStorePort>,
}

impl fmt::Debug for TodoService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoService").finish_non_exhaustive()
    }
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStorePort>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Todo>, ApplicationError> {
        let todos = self.store.list().await?;
        debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &TodoId) -> Result<Todo, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self, draft), fields(is_complete = draft.is_complete))]
    pub async fn create(&self, draft: &TodoDraft) -> Result<Todo, ApplicationError> {
        let todo = self.store.create(draft).await?;
        debug!(id = %todo.id, "Created todo");
        Ok(todo)
    }

    #[instrument(skip(self, draft), fields(id = %id))]
    pub async fn update(&self, id: &TodoId, draft: &TodoDraft) -> Result<Todo, ApplicationError> {
        self.store
            .update(id, draft)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &TodoId) -> Result<(), ApplicationError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApplicationError::NotFound(NOT_FOUND.to_string()))
        }
    }
}
