//! SQLite todo repository implementation.
//!
//! Implements `TodoRepository` from `taskling-core`. Every statement
//! carries the owning account id in its WHERE clause, so ownership
//! checking and mutation are one atomic write and a foreign todo is
//! indistinguishable from a missing one.

use sqlx::Row;
use taskling_core::repository::todo::TodoRepository;
use taskling_types::error::RepositoryError;
use taskling_types::todo::{NewTodo, Todo, TodoPayload};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `TodoRepository`.
pub struct SqliteTodoRepository {
    pool: DatabasePool,
}

impl SqliteTodoRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn todo_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Todo, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let due_date: Option<String> = row
        .try_get("due_date")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Todo {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        account_id: row
            .try_get("account_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        completed: row
            .try_get("completed")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
        due_date: due_date.as_deref().map(parse_datetime).transpose()?,
    })
}

impl TodoRepository for SqliteTodoRepository {
    async fn list_for_account(&self, account_id: i64) -> Result<Vec<Todo>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM todos WHERE account_id = ? ORDER BY id")
            .bind(account_id)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(todo_from_row).collect()
    }

    async fn get_for_account(
        &self,
        account_id: i64,
        id: i64,
    ) -> Result<Option<Todo>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM todos WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(todo_from_row).transpose()
    }

    async fn create(&self, todo: &NewTodo) -> Result<Todo, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO todos (account_id, title, completed, created_at, due_date)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(todo.account_id)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(format_datetime(&todo.created_at))
        .bind(todo.due_date.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Todo {
            id: result.last_insert_rowid(),
            account_id: todo.account_id,
            title: todo.title.clone(),
            completed: todo.completed,
            created_at: todo.created_at,
            due_date: todo.due_date,
        })
    }

    async fn update_for_account(
        &self,
        account_id: i64,
        id: i64,
        payload: &TodoPayload,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, completed = ?, due_date = ?
             WHERE id = ? AND account_id = ?",
        )
        .bind(&payload.title)
        .bind(payload.completed)
        .bind(payload.due_date.as_ref().map(format_datetime))
        .bind(id)
        .bind(account_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_for_account(&self, account_id: i64, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
