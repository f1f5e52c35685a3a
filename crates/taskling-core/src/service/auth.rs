//! Authentication gate.
//!
//! Binds every data operation to an owning account: `resolve` turns a
//! presented token into an account, `login` exchanges credentials for the
//! account's (lazily created) API key, and `regenerate_key` rotates the
//! token, invalidating the previous value immediately.

use taskling_types::account::{Account, new_api_key_token};
use taskling_types::error::{AuthError, RepositoryError};

use crate::repository::account::AccountRepository;
use crate::repository::api_key::ApiKeyRepository;
use crate::service::password::CredentialHasher;

/// Service resolving and issuing API key credentials.
///
/// Generic over repository and hasher traits -- taskling-core never
/// depends on taskling-infra.
pub struct AuthService<A: AccountRepository, K: ApiKeyRepository, H: CredentialHasher> {
    account_repo: A,
    key_repo: K,
    hasher: H,
}

impl<A: AccountRepository, K: ApiKeyRepository, H: CredentialHasher> AuthService<A, K, H> {
    pub fn new(account_repo: A, key_repo: K, hasher: H) -> Self {
        Self {
            account_repo,
            key_repo,
            hasher,
        }
    }

    /// Resolve a presented token to its owning account.
    ///
    /// Every failure mode maps to `UnknownKey`; callers turn that into a
    /// 401 without revealing whether the token ever existed.
    pub async fn resolve(&self, token: &str) -> Result<Account, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::UnknownKey);
        }

        self.key_repo
            .find_account_by_key(token)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::UnknownKey)
    }

    /// Verify a username/password pair and return the account's API key
    /// token, creating the key row on first login.
    ///
    /// Idempotent: repeated logins without an intervening regeneration
    /// return the same token. The error does not distinguish an unknown
    /// username from a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let account = self
            .account_repo
            .get_by_username(username)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::debug!(username, "password verification failed");
            return Err(AuthError::InvalidCredentials);
        }

        self.get_or_create_key(account.id).await
    }

    /// Fetch the account's key, issuing one if none exists yet.
    async fn get_or_create_key(&self, account_id: i64) -> Result<String, AuthError> {
        if let Some(existing) = self
            .key_repo
            .get_for_account(account_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
        {
            return Ok(existing.key);
        }

        let token = new_api_key_token();
        match self.key_repo.create(account_id, &token, chrono::Utc::now()).await {
            Ok(created) => Ok(created.key),
            // Two first-logins raced; the other insert won, so return its key.
            Err(RepositoryError::Conflict(_)) => {
                let existing = self
                    .key_repo
                    .get_for_account(account_id)
                    .await
                    .map_err(|e| AuthError::Storage(e.to_string()))?
                    .ok_or_else(|| AuthError::Storage("key vanished after conflict".to_string()))?;
                Ok(existing.key)
            }
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }

    /// Replace the account's key with a fresh token.
    ///
    /// The old token stops resolving as soon as the write lands. Fails
    /// with `KeyNotFound` when the account has never been issued a key.
    pub async fn regenerate_key(&self, account: &Account) -> Result<String, AuthError> {
        let token = new_api_key_token();
        match self.key_repo.replace_key(account.id, &token).await {
            Ok(()) => {
                tracing::info!(account_id = account.id, "API key regenerated");
                Ok(token)
            }
            Err(RepositoryError::NotFound) => Err(AuthError::KeyNotFound),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }
}
