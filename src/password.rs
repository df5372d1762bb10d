//! Password hashing for seeded sample users.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::{Error, Result};

/// Hash a password with Argon2id and a fresh random salt.
///
/// The salt is generated per call, so hashing the same password twice
/// yields different hashes.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Verification uses the parameters embedded in the hash itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips() {
        let hash = hash_password("password123").unwrap();
        assert!(!hash.is_empty());
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hash1 = hash_password("password123").unwrap();
        let hash2 = hash_password("password123").unwrap();

        // Fresh salt per call.
        assert_ne!(hash1, hash2);
        assert!(verify_password("password123", &hash1).unwrap());
        assert!(verify_password("password123", &hash2).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("password123", "not-a-phc-string"),
            Err(Error::PasswordHash(_))
        ));
    }
}
