//! Repository for the `tokens` table.

use ironlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::token::{CreateToken, Token};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "hash, user_id, expiry, scope";

/// Insert and bulk-revoke bearer tokens.
///
/// Lookup by plaintext goes through [`UserRepo::find_by_token`], which joins
/// straight to the owning user.
///
/// [`UserRepo::find_by_token`]: crate::repositories::UserRepo::find_by_token
pub struct TokenRepo;

impl TokenRepo {
    /// Insert a new token row, returning it.
    pub async fn create(pool: &PgPool, input: &CreateToken) -> Result<Token, sqlx::Error> {
        let query = format!(
            "INSERT INTO tokens (hash, user_id, expiry, scope)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Token>(&query)
            .bind(&input.hash)
            .bind(input.user_id)
            .bind(input.expiry)
            .bind(&input.scope)
            .fetch_one(pool)
            .await
    }

    /// Delete every token for `user_id` in `scope`. Returns the count removed.
    ///
    /// Idempotent: deleting when none exist returns `Ok(0)`.
    pub async fn delete_all_for_user(
        pool: &PgPool,
        user_id: DbId,
        scope: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = $1 AND scope = $2")
            .bind(user_id)
            .bind(scope)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
