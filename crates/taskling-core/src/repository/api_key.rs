//! API key repository trait definition.

use chrono::{DateTime, Utc};
use taskling_types::account::{Account, ApiKey};
use taskling_types::error::RepositoryError;

/// Repository trait for API key persistence.
///
/// An account holds at most one key row (UNIQUE on the owning account);
/// creating a second concurrently yields `Conflict`.
pub trait ApiKeyRepository: Send + Sync {
    /// Resolve a presented token to its owning account in a single lookup.
    fn find_account_by_key(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Get the key row for an account, if one has been issued.
    fn get_for_account(
        &self,
        account_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<ApiKey>, RepositoryError>> + Send;

    /// Insert a key row for an account that has none yet.
    fn create(
        &self,
        account_id: i64,
        key: &str,
        created_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<ApiKey, RepositoryError>> + Send;

    /// Swap the token value of an existing key row in one atomic write.
    /// Returns `NotFound` when the account has no key row.
    fn replace_key(
        &self,
        account_id: i64,
        new_key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
