//! Account provisioning and profile management.

use chrono::Utc;
use taskling_types::account::{Account, NewAccount, ProfileOut, ProfileUpdate};
use taskling_types::error::{AccountError, RepositoryError};

use crate::repository::account::AccountRepository;
use crate::repository::api_key::ApiKeyRepository;
use crate::service::password::CredentialHasher;

/// Request to provision a new account (CLI path; there is no registration
/// endpoint).
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Service for account provisioning and profile reads/writes.
pub struct AccountService<A: AccountRepository, K: ApiKeyRepository, H: CredentialHasher> {
    account_repo: A,
    key_repo: K,
    hasher: H,
}

impl<A: AccountRepository, K: ApiKeyRepository, H: CredentialHasher> AccountService<A, K, H> {
    pub fn new(account_repo: A, key_repo: K, hasher: H) -> Self {
        Self {
            account_repo,
            key_repo,
            hasher,
        }
    }

    /// Create an account with a hashed password and a server-assigned join
    /// timestamp.
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<Account, AccountError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AccountError::InvalidUsername(
                "username cannot be empty".to_string(),
            ));
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(|_| AccountError::HashingFailed)?;

        let new_account = NewAccount {
            username: username.clone(),
            password_hash,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            date_joined: Utc::now(),
        };

        match self.account_repo.create(&new_account).await {
            Ok(account) => Ok(account),
            Err(RepositoryError::Conflict(_)) => Err(AccountError::UsernameTaken(username)),
            Err(e) => Err(AccountError::Storage(e.to_string())),
        }
    }

    /// List all accounts (CLI listing).
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.account_repo
            .list()
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))
    }

    /// Assemble the profile view: identity fields plus the current API key
    /// token.
    ///
    /// The key row exists whenever the caller authenticated through the
    /// gate; its absence means the account was mutated concurrently and is
    /// reported as not found.
    pub async fn get_profile(&self, account: &Account) -> Result<ProfileOut, AccountError> {
        let key = self
            .key_repo
            .get_for_account(account.id)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::NotFound)?;

        Ok(ProfileOut {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            date_joined: account.date_joined,
            api_key: key.key,
        })
    }

    /// Apply a partial profile update: only fields present in the request
    /// are changed, each checked explicitly.
    pub async fn update_profile(
        &self,
        account: Account,
        update: ProfileUpdate,
    ) -> Result<ProfileOut, AccountError> {
        let mut account = account;

        if let Some(email) = update.email {
            account.email = email;
        }
        if let Some(first_name) = update.first_name {
            account.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            account.last_name = last_name;
        }

        self.account_repo
            .update_profile_fields(&account)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AccountError::NotFound,
                other => AccountError::Storage(other.to_string()),
            })?;

        self.get_profile(&account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_default_is_noop() {
        let upd = ProfileUpdate::default();
        assert!(upd.email.is_none());
        assert!(upd.first_name.is_none());
        assert!(upd.last_name.is_none());
    }
}
