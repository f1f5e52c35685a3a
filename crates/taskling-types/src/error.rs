use thiserror::Error;

/// Errors from the authentication gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password pair did not match a stored account.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Presented token did not resolve to an account.
    #[error("invalid API key")]
    UnknownKey,

    /// Key regeneration requested for an account that has never been
    /// issued a key.
    #[error("no API key record for this account")]
    KeyNotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account not found")]
    NotFound,

    #[error("username '{0}' already exists")]
    UsernameTaken(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("password hashing failed")]
    HashingFailed,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to todo operations.
///
/// Ownership mismatches surface as `NotFound`: a todo owned by another
/// account is indistinguishable from one that does not exist.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in
/// taskling-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid username or password"
        );
    }

    #[test]
    fn test_account_error_display() {
        let err = AccountError::UsernameTaken("alice".to_string());
        assert_eq!(err.to_string(), "username 'alice' already exists");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
