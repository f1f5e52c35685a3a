//! Argon2 password hashing for account credentials.
//!
//! Implements the `CredentialHasher` trait from `taskling-core` using the
//! `argon2` crate (RustCrypto ecosystem). Hashes are PHC strings carrying
//! their own salt and parameters.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use taskling_core::service::password::{CredentialHasher, HashingError};

/// Argon2id implementation of `CredentialHasher` with default parameters.
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// Create a new hasher.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| HashingError)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
