//! SQLite API key repository implementation.
//!
//! Implements `ApiKeyRepository` from `taskling-core`. Token resolution
//! joins straight to the owning account so the auth gate needs a single
//! query per request.

use chrono::{DateTime, Utc};
use sqlx::Row;
use taskling_core::repository::api_key::ApiKeyRepository;
use taskling_types::account::{Account, ApiKey};
use taskling_types::error::RepositoryError;

use super::account::account_from_row;
use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ApiKeyRepository`.
pub struct SqliteApiKeyRepository {
    pool: DatabasePool,
}

impl SqliteApiKeyRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn api_key_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ApiKey, RepositoryError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(ApiKey {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        account_id: row
            .try_get("account_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        key: row
            .try_get("key")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl ApiKeyRepository for SqliteApiKeyRepository {
    async fn find_account_by_key(&self, key: &str) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query(
            "SELECT a.* FROM accounts a
             JOIN api_keys k ON k.account_id = a.id
             WHERE k.key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn get_for_account(&self, account_id: i64) -> Result<Option<ApiKey>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM api_keys WHERE account_id = ?")
            .bind(account_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(api_key_from_row).transpose()
    }

    async fn create(
        &self,
        account_id: i64,
        key: &str,
        created_at: DateTime<Utc>,
    ) -> Result<ApiKey, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO api_keys (account_id, key, created_at) VALUES (?, ?, ?)",
        )
        .bind(account_id)
        .bind(key)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(ApiKey {
                id: done.last_insert_rowid(),
                account_id,
                key: key.to_string(),
                created_at,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict("account already has an API key".to_string()),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn replace_key(&self, account_id: i64, new_key: &str) -> Result<(), RepositoryError> {
        // Single guarded write: the old token stops resolving the moment
        // this lands, and a missing key row shows up as zero rows touched.
        let result = sqlx::query("UPDATE api_keys SET key = ? WHERE account_id = ?")
            .bind(new_key)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::account::SqliteAccountRepository;
    use taskling_core::repository::account::AccountRepository;
    use taskling_types::account::NewAccount;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_account(pool: &DatabasePool, username: &str) -> Account {
        let repo = SqliteAccountRepository::new(pool.clone());
        repo.create(&NewAccount {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: Utc::now(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "alice").await;
        let repo = SqliteApiKeyRepository::new(pool);

        repo.create(account.id, "tok-1", Utc::now()).await.unwrap();

        let resolved = repo.find_account_by_key("tok-1").await.unwrap().unwrap();
        assert_eq!(resolved.id, account.id);
        assert_eq!(resolved.username, "alice");

        let unknown = repo.find_account_by_key("tok-2").await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_one_key_per_account() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "bob").await;
        let repo = SqliteApiKeyRepository::new(pool);

        repo.create(account.id, "tok-1", Utc::now()).await.unwrap();
        let err = repo.create(account.id, "tok-2", Utc::now()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_replace_key_invalidates_old_token() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "carol").await;
        let repo = SqliteApiKeyRepository::new(pool);

        repo.create(account.id, "old-tok", Utc::now()).await.unwrap();
        repo.replace_key(account.id, "new-tok").await.unwrap();

        assert!(repo.find_account_by_key("old-tok").await.unwrap().is_none());
        let resolved = repo.find_account_by_key("new-tok").await.unwrap().unwrap();
        assert_eq!(resolved.id, account.id);
    }

    #[tokio::test]
    async fn test_replace_key_without_record_is_not_found() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "dave").await;
        let repo = SqliteApiKeyRepository::new(pool);

        let err = repo.replace_key(account.id, "tok").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_get_for_account() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "erin").await;
        let repo = SqliteApiKeyRepository::new(pool);

        assert!(repo.get_for_account(account.id).await.unwrap().is_none());

        repo.create(account.id, "tok", Utc::now()).await.unwrap();
        let key = repo.get_for_account(account.id).await.unwrap().unwrap();
        assert_eq!(key.key, "tok");
        assert_eq!(key.account_id, account.id);
    }
}

#[cfg(test)]
mod auth_flow_tests {
    //! End-to-end gate behavior through `AuthService` wired to the real
    //! SQLite repositories and argon2 hasher.

    use chrono::Utc;
    use taskling_core::service::account::{AccountService, CreateAccountRequest};
    use taskling_core::service::auth::AuthService;
    use taskling_types::error::AuthError;

    use crate::crypto::password::Argon2CredentialHasher;
    use crate::sqlite::account::SqliteAccountRepository;
    use crate::sqlite::pool::DatabasePool;
    use crate::sqlite::api_key::SqliteApiKeyRepository;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn auth_service(
        pool: &DatabasePool,
    ) -> AuthService<SqliteAccountRepository, SqliteApiKeyRepository, Argon2CredentialHasher> {
        AuthService::new(
            SqliteAccountRepository::new(pool.clone()),
            SqliteApiKeyRepository::new(pool.clone()),
            Argon2CredentialHasher::new(),
        )
    }

    fn account_service(
        pool: &DatabasePool,
    ) -> AccountService<SqliteAccountRepository, SqliteApiKeyRepository, Argon2CredentialHasher>
    {
        AccountService::new(
            SqliteAccountRepository::new(pool.clone()),
            SqliteApiKeyRepository::new(pool.clone()),
            Argon2CredentialHasher::new(),
        )
    }

    async fn provision(pool: &DatabasePool, username: &str, password: &str) {
        account_service(pool)
            .create_account(CreateAccountRequest {
                username: username.to_string(),
                password: password.to_string(),
                email: format!("{username}@example.com"),
                first_name: String::new(),
                last_name: String::new(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_issues_key_lazily_and_idempotently() {
        let pool = test_pool().await;
        provision(&pool, "alice", "secret").await;
        let auth = auth_service(&pool);

        let first = auth.login("alice", "secret").await.unwrap();
        let second = auth.login("alice", "secret").await.unwrap();
        assert_eq!(first, second, "repeated logins return the same key");

        let account = auth.resolve(&first).await.unwrap();
        assert_eq!(account.username, "alice");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let pool = test_pool().await;
        provision(&pool, "alice", "secret").await;
        let auth = auth_service(&pool);

        let err = auth.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = auth.login("nobody", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_or_blank_tokens() {
        let pool = test_pool().await;
        let auth = auth_service(&pool);

        assert!(matches!(
            auth.resolve("no-such-token").await.unwrap_err(),
            AuthError::UnknownKey
        ));
        assert!(matches!(
            auth.resolve("  ").await.unwrap_err(),
            AuthError::UnknownKey
        ));
    }

    #[tokio::test]
    async fn test_regenerate_invalidates_previous_key() {
        let pool = test_pool().await;
        provision(&pool, "alice", "secret").await;
        let auth = auth_service(&pool);

        let old = auth.login("alice", "secret").await.unwrap();
        let account = auth.resolve(&old).await.unwrap();

        let new = auth.regenerate_key(&account).await.unwrap();
        assert_ne!(old, new);

        assert!(matches!(
            auth.resolve(&old).await.unwrap_err(),
            AuthError::UnknownKey
        ));
        assert_eq!(auth.resolve(&new).await.unwrap().id, account.id);

        // and the next login returns the regenerated key
        assert_eq!(auth.login("alice", "secret").await.unwrap(), new);
    }

    #[tokio::test]
    async fn test_regenerate_before_first_login_is_key_not_found() {
        let pool = test_pool().await;
        provision(&pool, "alice", "secret").await;

        let accounts = SqliteAccountRepository::new(pool.clone());
        use taskling_core::repository::account::AccountRepository;
        let account = accounts.get_by_username("alice").await.unwrap().unwrap();

        let err = auth_service(&pool)
            .regenerate_key(&account)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::KeyNotFound));
    }

    #[tokio::test]
    async fn test_profile_includes_current_key_and_updates_partially() {
        let pool = test_pool().await;
        provision(&pool, "alice", "secret").await;
        let auth = auth_service(&pool);
        let accounts = account_service(&pool);

        let token = auth.login("alice", "secret").await.unwrap();
        let account = auth.resolve(&token).await.unwrap();

        let profile = accounts.get_profile(&account).await.unwrap();
        assert_eq!(profile.api_key, token);
        assert_eq!(profile.email, "alice@example.com");

        let updated = accounts
            .update_profile(
                account,
                taskling_types::account::ProfileUpdate {
                    first_name: Some("Alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Alice");
        // absent fields keep their stored values
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.api_key, token);

        assert_eq!(
            Utc::now().signed_duration_since(updated.date_joined).num_days(),
            0
        );
    }
}
