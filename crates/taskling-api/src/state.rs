//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over repository/hasher traits, but AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use taskling_core::service::account::AccountService;
use taskling_core::service::auth::AuthService;
use taskling_core::service::todo::TodoService;
use taskling_infra::crypto::password::Argon2CredentialHasher;
use taskling_infra::sqlite::account::SqliteAccountRepository;
use taskling_infra::sqlite::api_key::SqliteApiKeyRepository;
use taskling_infra::sqlite::pool::{DatabasePool, resolve_data_dir};
use taskling_infra::sqlite::todo::SqliteTodoRepository;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteAuthService =
    AuthService<SqliteAccountRepository, SqliteApiKeyRepository, Argon2CredentialHasher>;

pub type ConcreteAccountService =
    AccountService<SqliteAccountRepository, SqliteApiKeyRepository, Argon2CredentialHasher>;

pub type ConcreteTodoService = TodoService<SqliteTodoRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub account_service: Arc<ConcreteAccountService>,
    pub todo_service: Arc<ConcreteTodoService>,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire
    /// services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("taskling.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let auth_service = AuthService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            SqliteApiKeyRepository::new(db_pool.clone()),
            Argon2CredentialHasher::new(),
        );

        let account_service = AccountService::new(
            SqliteAccountRepository::new(db_pool.clone()),
            SqliteApiKeyRepository::new(db_pool.clone()),
            Argon2CredentialHasher::new(),
        );

        let todo_service = TodoService::new(SqliteTodoRepository::new(db_pool));

        Ok(Self {
            auth_service: Arc::new(auth_service),
            account_service: Arc::new(account_service),
            todo_service: Arc::new(todo_service),
        })
    }
}
