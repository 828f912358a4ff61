//! Opaque bearer token generation and hashing.
//!
//! A token is a random alphanumeric secret. Only its SHA-256 hex digest is
//! stored; the plaintext is handed to the caller once and then forgotten.
//! Lookup recomputes the digest of whatever the client presents.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of the generated plaintext token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 32;

/// Default lifetime of an `auth` scoped token, in hours.
pub const DEFAULT_AUTH_TOKEN_TTL_HOURS: i64 = 24;

/// Known token scope names.
pub mod scopes {
    /// Login sessions issued by `POST /tokens/authentication`.
    pub const AUTH: &str = "auth";
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A freshly generated token.
///
/// `plaintext` goes back to the client exactly once; everything else is what
/// gets persisted.
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    pub plaintext: String,
    pub hash: String,
    pub user_id: DbId,
    pub scope: String,
    pub expiry: Timestamp,
}

/// Generate a new random token bound to `user_id` and `scope`, expiring
/// `ttl` from now.
pub fn generate_token(user_id: DbId, ttl: Duration, scope: &str) -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();

    let hash = hash_token(&plaintext);

    GeneratedToken {
        plaintext,
        hash,
        user_id,
        scope: scope.to_string(),
        expiry: Utc::now() + ttl,
    }
}

/// Compute the stored digest of a plaintext token.
pub fn hash_token(plaintext: &str) -> String {
    crate::hashing::sha256_hex(plaintext.as_bytes())
}
