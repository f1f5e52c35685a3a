//! Todo store façade.
//!
//! Every operation takes the authenticated account explicitly; nothing is
//! smuggled through request-scoped state. Ownership filtering happens in
//! the repository, so this layer only translates storage outcomes into
//! domain errors.

use chrono::Utc;
use taskling_types::error::{RepositoryError, TodoError};
use taskling_types::todo::{NewTodo, Todo, TodoPayload};

use crate::repository::todo::TodoRepository;

/// Service for ownership-scoped todo CRUD.
pub struct TodoService<T: TodoRepository> {
    todo_repo: T,
}

impl<T: TodoRepository> TodoService<T> {
    pub fn new(todo_repo: T) -> Self {
        Self { todo_repo }
    }

    /// All todos owned by the account, in insertion order.
    pub async fn list(&self, account_id: i64) -> Result<Vec<Todo>, TodoError> {
        self.todo_repo
            .list_for_account(account_id)
            .await
            .map_err(|e| TodoError::Storage(e.to_string()))
    }

    /// A single owned todo; another account's todo is reported as missing.
    pub async fn get(&self, account_id: i64, id: i64) -> Result<Todo, TodoError> {
        self.todo_repo
            .get_for_account(account_id, id)
            .await
            .map_err(|e| TodoError::Storage(e.to_string()))?
            .ok_or(TodoError::NotFound)
    }

    /// Create a todo with a server-assigned id and creation timestamp.
    pub async fn create(&self, account_id: i64, payload: TodoPayload) -> Result<Todo, TodoError> {
        let new_todo = NewTodo {
            account_id,
            title: payload.title,
            completed: payload.completed,
            created_at: Utc::now(),
            due_date: payload.due_date,
        };

        self.todo_repo
            .create(&new_todo)
            .await
            .map_err(|e| TodoError::Storage(e.to_string()))
    }

    /// Full replace of title/completed/due_date.
    ///
    /// The payload's serde defaults already resolved omitted fields to
    /// `false`/`null`, so the stored row is overwritten wholesale.
    pub async fn update(
        &self,
        account_id: i64,
        id: i64,
        payload: TodoPayload,
    ) -> Result<Todo, TodoError> {
        self.todo_repo
            .update_for_account(account_id, id, &payload)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TodoError::NotFound,
                other => TodoError::Storage(other.to_string()),
            })?;

        // Re-read for the response; a concurrent delete between the write
        // and this read degrades to NotFound, which is also what the
        // delete's winner reported.
        self.get(account_id, id).await
    }

    /// Delete an owned todo.
    pub async fn delete(&self, account_id: i64, id: i64) -> Result<(), TodoError> {
        self.todo_repo
            .delete_for_account(account_id, id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TodoError::NotFound,
                other => TodoError::Storage(other.to_string()),
            })
    }
}
