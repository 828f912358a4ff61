//! Bearer-token authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use ironlog_core::error::CoreError;
use ironlog_core::tokens::scopes;
use ironlog_core::types::DbId;

use crate::auth::tokens::TokenService;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated user resolved from a Bearer token.
///
/// Use as an extractor in handlers that require authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
}

/// The identity a request acts as.
///
/// A request without an `Authorization` header is `Anonymous`. A header that
/// is present but malformed, or carries a token that does not resolve, is
/// rejected with 401 rather than downgraded to anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActingUser {
    Authenticated(AuthUser),
    Anonymous,
}

impl ActingUser {
    /// The user id, or `None` when anonymous.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            ActingUser::Authenticated(user) => Some(user.user_id),
            ActingUser::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, ActingUser::Anonymous)
    }
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(ActingUser::Anonymous);
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let user = TokenService::resolve(&state.pool, scopes::AUTH, token)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        Ok(ActingUser::Authenticated(AuthUser {
            user_id: user.id,
            username: user.username,
        }))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match ActingUser::from_request_parts(parts, state).await? {
            ActingUser::Authenticated(user) => Ok(user),
            ActingUser::Anonymous => Err(AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))),
        }
    }
}
