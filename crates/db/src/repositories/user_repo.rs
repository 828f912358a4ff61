//! Repository for the `users` table.

use ironlog_core::error::CoreError;
use ironlog_core::types::DbId;
use sqlx::PgPool;

use crate::error::{map_unique_violation, RepoResult};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, bio, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate username or email fails with `CoreError::Conflict`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> RepoResult<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, bio)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
            .map_err(|e| map_unique_violation(e, describe_constraint))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find the owner of a live token by its digest and scope.
    ///
    /// Expired tokens are filtered here rather than purged, so an expired or
    /// unknown token simply yields `None`.
    pub async fn find_by_token(
        pool: &PgPool,
        scope: &str,
        token_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = "SELECT u.id, u.username, u.email, u.password_hash, u.bio, \
                            u.created_at, u.updated_at
                     FROM users u
                     JOIN tokens t ON t.user_id = u.id
                     WHERE t.hash = $1 AND t.scope = $2 AND t.expiry > NOW()";
        sqlx::query_as::<_, User>(query)
            .bind(token_hash)
            .bind(scope)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's profile. Only non-`None` fields in `input` are applied.
    ///
    /// Fails with `CoreError::NotFound` when the row no longer exists and with
    /// `CoreError::Conflict` when the new username or email is taken.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> RepoResult<User> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                bio = COALESCE($4, bio)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.bio)
            .fetch_optional(pool)
            .await
            .map_err(|e| map_unique_violation(e, describe_constraint))?
            .ok_or_else(|| CoreError::NotFound { entity: "User", id }.into())
    }

    /// Replace a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn describe_constraint(constraint: &str) -> String {
    match constraint {
        "uq_users_username" => "a user with that username already exists".to_string(),
        "uq_users_email" => "a user with that email already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
