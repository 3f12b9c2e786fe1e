//! Password hashing with Argon2id.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::error::{IamError, IamResult};

/// Salted, slow password hashing.
///
/// Both operations are CPU-bound and run on the blocking thread pool so
/// they never stall the async executor.
#[derive(Clone, Default)]
pub struct HashingService;

impl HashingService {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password, returning a PHC-formatted digest.
    pub async fn hash(&self, plaintext: &str) -> IamResult<String> {
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&plaintext))
            .await
            .map_err(|e| IamError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// Compare a plaintext password against a stored digest.
    pub async fn compare(&self, plaintext: &str, digest: &str) -> IamResult<bool> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || compare_blocking(&plaintext, &digest))
            .await
            .map_err(|e| IamError::Internal(format!("Hashing task failed: {}", e)))?
    }
}

fn hash_blocking(plaintext: &str) -> IamResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IamError::Hashing(format!("Failed to hash password: {}", e)))
}

fn compare_blocking(plaintext: &str, digest: &str) -> IamResult<bool> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| IamError::Hashing(format!("Invalid password digest: {}", e)))?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(IamError::Hashing(format!("Failed to verify password: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_compare() {
        let hashing = HashingService::new();

        let digest = hashing.hash("correct horse battery").await.unwrap();
        assert!(digest.starts_with("$argon2"), "digest should be in PHC format");
        assert_ne!(digest, "correct horse battery");

        assert!(hashing.compare("correct horse battery", &digest).await.unwrap());
        assert!(!hashing.compare("wrong horse battery", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_is_salted() {
        let hashing = HashingService::new();
        let a = hashing.hash("same-password").await.unwrap();
        let b = hashing.hash("same-password").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_compare_rejects_malformed_digest() {
        let hashing = HashingService::new();
        let err = hashing.compare("anything", "not-a-phc-string").await.unwrap_err();
        assert!(matches!(err, IamError::Hashing(_)));
    }

    #[tokio::test]
    async fn test_compare_rejects_unsupported_algorithm() {
        let hashing = HashingService::new();
        let digest = hashing.hash("correct horse battery").await.unwrap();
        // Same salt and hash, but an algorithm Argon2 cannot verify
        let foreign = digest.replacen("$argon2id$", "$scrypt$", 1);

        let err = hashing
            .compare("correct horse battery", &foreign)
            .await
            .unwrap_err();
        assert!(matches!(err, IamError::Hashing(_)));
    }
}
