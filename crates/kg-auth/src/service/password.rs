//! Credential Hashing
//!
//! Argon2id hashing for secrets - both passwords and refresh tokens. Each
//! hash uses a fresh random salt, so hashing the same secret twice yields
//! different PHC strings while both still verify.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as HashError, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

pub type HashResult<T> = std::result::Result<T, HashError>;

#[derive(Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// One-way hash of `secret` as an Argon2id PHC string.
    pub fn hash(&self, secret: &str) -> HashResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self.argon2.hash_password(secret.as_bytes(), &salt)?.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only for malformed hash material.
    pub fn verify(&self, secret: &str, hashed: &str) -> HashResult<bool> {
        let parsed = PasswordHash::new(hashed)?;
        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
