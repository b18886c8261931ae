//! Todo CRUD handlers
//!
//! Thin passthrough to the `todos` table. Bodies are validated before the
//! store is touched.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use domain::{Todo, TodoDraft, TodoId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Create and update body
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"title": "Record a voice sample", "is_complete": false}))]
pub struct TodoRequest {
    pub title: String,
    pub is_complete: bool,
}

impl From<TodoRequest> for TodoDraft {
    fn from(req: TodoRequest) -> Self {
        Self {
            title: req.title,
            is_complete: req.is_complete,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title,
            is_complete: todo.is_complete,
            created_at: todo.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todos", body = Vec<TodoResponse>),
        (status = 500, description = "Store error", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.todos.list().await?;
    debug!(count = todos.len(), "Listed todos");
    Ok(Json(todos.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 404, description = "Todo not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.todos.get(&TodoId::new(id)).await?;
    Ok(Json(todo.into()))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = TodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 500, description = "Store error", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let todo = state.todos.create(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 404, description = "Todo not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<TodoRequest>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state
        .todos
        .update(&TodoId::new(id), &request.into())
        .await?;
    Ok(Json(todo.into()))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo ID")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.todos.delete(&TodoId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

