//! Password hashing.
//!
//! Uses Argon2id with default parameters and a fresh [`OsRng`] salt per
//! hash. Hashes are stored as PHC strings, so the parameters and salt
//! travel with each hash and can be tightened later without a migration.
//!
//! Strength rules (minimum length) live in `lingo_core::users`; this module
//! is only the cryptographic boundary.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only malformed hashes and internal failures
/// surface as errors.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("hunter2hunter2").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected a PHC argon2id string");
        assert!(verify_password("hunter2hunter2", &hash).expect("verify should succeed"));
    }

    #[test]
    fn mismatched_password_is_false_not_error() {
        let hash = hash_password("the-real-one").expect("hashing should succeed");
        assert!(!verify_password("a-guess", &hash).expect("verify should succeed"));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn salting_makes_hashes_distinct() {
        let first = hash_password("same-input").expect("hashing should succeed");
        let second = hash_password("same-input").expect("hashing should succeed");
        assert_ne!(first, second);
    }
}
