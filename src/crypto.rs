//! Password hashing
//!
//! One-way Argon2id hashing for `password` fields. Hashes are salted, so
//! the same secret never produces the same hash twice; verification goes
//! through the stored hash only.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Result type for crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors raised by the credential transform
#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    /// The hashing primitive itself failed
    #[error("password hashing failed")]
    HashingFailed,

    /// A stored hash could not be parsed
    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> CryptoResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CryptoError::HashingFailed)
}

/// Verify a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> CryptoResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|_| CryptoError::MalformedHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2hunter2").unwrap();

        assert_ne!(hash, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same_secret").unwrap();
        let second = hash_password("same_secret").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same_secret", &first).unwrap());
        assert!(verify_password("same_secret", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(CryptoError::MalformedHash)));
    }
}
