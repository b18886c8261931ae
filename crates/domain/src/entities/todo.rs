//! Todo entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::TodoId;

/// A title/completion-flag record held in the external store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by clients when creating or replacing a todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    pub is_complete: bool,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, is_complete: bool) -> Self {
        Self {
            title: title.into(),
            is_complete,
        }
    }
}
