//! SQLite account repository implementation.
//!
//! Implements `AccountRepository` from `taskling-core` using sqlx with
//! split read/write pools.

use sqlx::Row;
use taskling_core::repository::account::AccountRepository;
use taskling_types::account::{Account, NewAccount};
use taskling_types::error::RepositoryError;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `AccountRepository`.
pub struct SqliteAccountRepository {
    pool: DatabasePool,
}

impl SqliteAccountRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

pub(super) fn account_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Account, RepositoryError> {
    let date_joined: String = row
        .try_get("date_joined")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Account {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        username: row
            .try_get("username")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        first_name: row
            .try_get("first_name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        last_name: row
            .try_get("last_name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        date_joined: parse_datetime(&date_joined)?,
    })
}

impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: &NewAccount) -> Result<Account, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO accounts (username, password_hash, email, first_name, last_name, date_joined)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(format_datetime(&account.date_joined))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(Account {
                id: done.last_insert_rowid(),
                username: account.username.clone(),
                password_hash: account.password_hash.clone(),
                email: account.email.clone(),
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
                date_joined: account.date_joined,
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "username '{}' already exists",
                    account.username
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM accounts ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update_profile_fields(&self, account: &Account) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE accounts SET email = ?, first_name = ?, last_name = ? WHERE id = ?",
        )
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.id)
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
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        let created = repo.create(&make_account("alice")).await.unwrap();
        assert!(created.id > 0);

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        repo.create(&make_account("bob")).await.unwrap();

        let found = repo.get_by_username("bob").await.unwrap().unwrap();
        assert_eq!(found.username, "bob");

        let missing = repo.get_by_username("nobody").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        repo.create(&make_account("carol")).await.unwrap();
        let err = repo.create(&make_account("carol")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_profile_fields() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        let mut account = repo.create(&make_account("dave")).await.unwrap();
        account.email = "dave@new.example".to_string();
        account.first_name = "Dave".to_string();

        repo.update_profile_fields(&account).await.unwrap();

        let found = repo.get_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(found.email, "dave@new.example");
        assert_eq!(found.first_name, "Dave");
        // untouched columns keep their values
        assert_eq!(found.username, "dave");
        assert_eq!(found.password_hash, "$argon2id$stub");
    }

    #[tokio::test]
    async fn test_update_missing_account_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        let mut ghost = repo.create(&make_account("erin")).await.unwrap();
        ghost.id += 100;

        let err = repo.update_profile_fields(&ghost).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let pool = test_pool().await;
        let repo = SqliteAccountRepository::new(pool);

        repo.create(&make_account("zoe")).await.unwrap();
        repo.create(&make_account("adam")).await.unwrap();

        let all = repo.list().await.unwrap();
        let names: Vec<&str> = all.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["zoe", "adam"]);
    }
}
