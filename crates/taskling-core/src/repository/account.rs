//! Account repository trait definition.

use taskling_types::account::{Account, NewAccount};
use taskling_types::error::RepositoryError;

/// Repository trait for account persistence.
///
/// Implementations live in taskling-infra (e.g., SqliteAccountRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. The store assigns the id.
    fn create(
        &self,
        account: &NewAccount,
    ) -> impl std::future::Future<Output = Result<Account, RepositoryError>> + Send;

    /// Get an account by id.
    fn get_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Get an account by its unique username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// List all accounts in id order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// Persist the profile fields (email, first/last name) of an existing
    /// account. Other columns are left untouched.
    fn update_profile_fields(
        &self,
        account: &Account,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
