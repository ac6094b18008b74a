//! Password hashing using bcrypt or argon2
//!
//! New hashes use the configured algorithm. Verification picks the algorithm
//! from the stored hash's prefix, so changing `password.algorithm` does not
//! lock out users hashed under the previous setting.
//!
//! # Performance Considerations
//!
//! Both algorithms are intentionally CPU-intensive. Async callers use the
//! `*_async` variants, which run on the blocking thread pool.

use crate::config::{PasswordAlgorithm, PasswordConfig};
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use session_auth_shared::validation::MAX_PASSWORD_BYTES;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Password hashing service
///
/// Holds only the algorithm choice and work factor, so it is `Copy` and can
/// be moved into blocking tasks freely.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    algorithm: PasswordAlgorithm,
    bcrypt_cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(&PasswordConfig::default())
    }
}

impl PasswordService {
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub fn algorithm(&self) -> PasswordAlgorithm {
        self.algorithm
    }

    /// Hash a password with a fresh random salt (blocking operation)
    ///
    /// bcrypt only reads the first 72 bytes of its input, so longer passwords
    /// are refused rather than silently truncated.
    pub fn hash(&self, password: &str) -> Result<String> {
        match self.algorithm {
            PasswordAlgorithm::Bcrypt => {
                if password.len() > MAX_PASSWORD_BYTES {
                    anyhow::bail!("Password exceeds {} bytes", MAX_PASSWORD_BYTES);
                }
                bcrypt::hash(password, self.bcrypt_cost)
                    .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
            }
            PasswordAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
                Ok(hash.to_string())
            }
        }
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(self, password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || self.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A mismatch is `Ok(false)`; only an unreadable hash is an error.
    /// A bcrypt hash never matches input over 72 bytes, since such a password
    /// could not have produced it.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        let matches = bcrypt::verify(password, hash)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(matches && password.len() <= MAX_PASSWORD_BYTES)
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
