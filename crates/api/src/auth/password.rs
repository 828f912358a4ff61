//! Argon2id password hashing and verification.
//!
//! All hashes use the Argon2id variant with a random salt from [`OsRng`]. The
//! PHC string format is stored, so algorithm parameters and salt travel with
//! the hash.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch. `Err` means the stored hash itself is
/// malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// A stored password credential.
///
/// Immutable: changing a password produces a new `Credential` via
/// [`Credential::set`]. The plaintext is never kept, and `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
}

impl Credential {
    /// Derive a new credential from a plaintext password.
    pub fn set(plaintext: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            hash: hash_password(plaintext)?,
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Check a candidate plaintext against this credential.
    pub fn matches(&self, plaintext: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(plaintext, &self.hash)
    }

    /// The PHC string, for persisting.
    pub fn as_hash(&self) -> &str {
        &self.hash
    }

    pub fn into_hash(self) -> String {
        self.hash
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
