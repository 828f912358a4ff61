//! Authentication primitives.
//!
//! - [`password`] -- Argon2id credential hashing and verification.
//! - [`tokens`] -- Opaque bearer token issuance, resolution, and revocation.

pub mod password;
pub mod tokens;
