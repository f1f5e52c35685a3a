//! Todo CRUD handlers.
//!
//! Every handler receives the resolved account from the auth extractor and
//! passes its id into the service, which scopes all storage access to that
//! owner.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use taskling_types::todo::{TodoOut, TodoPayload};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentAccount;
use crate::state::AppState;

/// GET /api/todos - All of the caller's todos, in insertion order.
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> Result<Json<Vec<TodoOut>>, AppError> {
    let todos = state.todo_service.list(account.id).await?;
    Ok(Json(todos.into_iter().map(TodoOut::from).collect()))
}

/// GET /api/todos/{id} - A single owned todo.
pub async fn get_todo(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<i64>,
) -> Result<Json<TodoOut>, AppError> {
    let todo = state.todo_service.get(account.id, id).await?;
    Ok(Json(todo.into()))
}

/// POST /api/todos - Create a todo owned by the caller.
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(body): Json<TodoPayload>,
) -> Result<Json<TodoOut>, AppError> {
    let todo = state.todo_service.create(account.id, body).await?;
    Ok(Json(todo.into()))
}

/// PUT /api/todos/{id} - Full replace of title/completed/due_date.
///
/// Omitted fields reset to their defaults (false/null); this is not a
/// partial update.
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<i64>,
    Json(body): Json<TodoPayload>,
) -> Result<Json<TodoOut>, AppError> {
    let todo = state.todo_service.update(account.id, id, body).await?;
    Ok(Json(todo.into()))
}

/// DELETE /api/todos/{id} - Remove an owned todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.todo_service.delete(account.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
