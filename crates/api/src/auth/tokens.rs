//! Bearer token issuance, resolution, and revocation.
//!
//! Tokens are opaque random strings. Only their SHA-256 digest is stored, so
//! a database leak does not expose live sessions. A token is valid while its
//! row exists and `expiry` is in the future; revocation deletes rows.

use chrono::Duration;
use ironlog_core::tokens::{generate_token, hash_token, DEFAULT_AUTH_TOKEN_TTL_HOURS};
use ironlog_core::types::DbId;
use ironlog_db::models::token::{CreateToken, Token};
use ironlog_db::models::user::User;
use ironlog_db::repositories::{TokenRepo, UserRepo};
use sqlx::PgPool;

/// Token lifetime configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Lifetime of `auth` scoped tokens in hours (default: 24).
    pub auth_token_ttl_hours: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            auth_token_ttl_hours: DEFAULT_AUTH_TOKEN_TTL_HOURS,
        }
    }
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `AUTH_TOKEN_TTL_HOURS` | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_TOKEN_TTL_HOURS` is set but is not a positive integer.
    pub fn from_env() -> Self {
        let auth_token_ttl_hours: i64 = std::env::var("AUTH_TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_AUTH_TOKEN_TTL_HOURS.to_string())
            .parse()
            .expect("AUTH_TOKEN_TTL_HOURS must be a valid i64");
        assert!(
            auth_token_ttl_hours > 0,
            "AUTH_TOKEN_TTL_HOURS must be positive"
        );

        Self {
            auth_token_ttl_hours,
        }
    }

    /// Lifetime of a freshly issued `auth` token.
    pub fn auth_ttl(&self) -> Duration {
        Duration::hours(self.auth_token_ttl_hours)
    }
}

/// Issues, resolves and revokes bearer tokens against the `tokens` table.
pub struct TokenService;

impl TokenService {
    /// Create and persist a new token for `user_id`.
    ///
    /// Returns the plaintext (to hand to the client exactly once) together
    /// with the stored record, which only carries the digest.
    pub async fn issue(
        pool: &PgPool,
        user_id: DbId,
        ttl: Duration,
        scope: &str,
    ) -> Result<(String, Token), sqlx::Error> {
        let generated = generate_token(user_id, ttl, scope);
        let record = TokenRepo::create(pool, &CreateToken::from(&generated)).await?;

        tracing::debug!(user_id, scope, expiry = %record.expiry, "Token issued");

        Ok((generated.plaintext, record))
    }

    /// Resolve a presented plaintext token to its user.
    ///
    /// Unknown, expired, revoked, and wrong-scope tokens all yield `Ok(None)`.
    pub async fn resolve(
        pool: &PgPool,
        scope: &str,
        plaintext: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_token(pool, scope, &hash_token(plaintext)).await
    }

    /// Revoke every token of `user_id` in `scope`. Idempotent.
    pub async fn revoke_all(pool: &PgPool, user_id: DbId, scope: &str) -> Result<u64, sqlx::Error> {
        let revoked = TokenRepo::delete_all_for_user(pool, user_id, scope).await?;
        tracing::debug!(user_id, scope, revoked, "Tokens revoked");
        Ok(revoked)
    }
}
