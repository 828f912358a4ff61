//! Bearer token model.

use ironlog_core::tokens::GeneratedToken;
use ironlog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tokens` table. Rows are never updated, only deleted.
#[derive(Debug, Clone, FromRow)]
pub struct Token {
    pub hash: String,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
}

/// DTO for inserting a token. Carries the digest only, never the plaintext.
#[derive(Debug)]
pub struct CreateToken {
    pub hash: String,
    pub user_id: DbId,
    pub expiry: Timestamp,
    pub scope: String,
}

impl From<&GeneratedToken> for CreateToken {
    fn from(token: &GeneratedToken) -> Self {
        Self {
            hash: token.hash.clone(),
            user_id: token.user_id,
            expiry: token.expiry,
            scope: token.scope.clone(),
        }
    }
}
