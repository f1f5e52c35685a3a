//! Password hashing trait (port).
//!
//! Keeps the core crate free of any crypto dependency; the argon2
//! implementation lives in taskling-infra.

/// Hashing and verification of account passwords.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password for storage. Fails only on RNG/parameter
    /// errors in the underlying implementation.
    fn hash(&self, password: &str) -> Result<String, HashingError>;

    /// Verify a plaintext password against a stored hash. Malformed hashes
    /// verify as false rather than erroring.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Opaque hashing failure.
#[derive(Debug)]
pub struct HashingError;

impl std::fmt::Display for HashingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "password hashing failed")
    }
}

impl std::error::Error for HashingError {}
