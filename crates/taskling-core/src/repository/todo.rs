//! Todo repository trait definition.
//!
//! Every operation takes the owning account id and filters on it in the
//! store, so a todo belonging to another account behaves exactly like a
//! missing one.

use taskling_types::error::RepositoryError;
use taskling_types::todo::{NewTodo, Todo, TodoPayload};

/// Repository trait for todo persistence.
pub trait TodoRepository: Send + Sync {
    /// All todos owned by the account, in insertion (id) order.
    fn list_for_account(
        &self,
        account_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Todo>, RepositoryError>> + Send;

    /// A single todo, or `None` when the id does not exist under this owner.
    fn get_for_account(
        &self,
        account_id: i64,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Todo>, RepositoryError>> + Send;

    /// Insert a new todo. The store assigns the id.
    fn create(
        &self,
        todo: &NewTodo,
    ) -> impl std::future::Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Replace title/completed/due_date of an owned todo.
    ///
    /// Ownership check and mutation happen in a single guarded write so a
    /// concurrent delete cannot race the lookup. Returns `NotFound` when
    /// the guarded write touches no row.
    fn update_for_account(
        &self,
        account_id: i64,
        id: i64,
        payload: &TodoPayload,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete an owned todo with the same single-write ownership guard.
    fn delete_for_account(
        &self,
        account_id: i64,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
