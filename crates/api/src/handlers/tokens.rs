//! Handlers for the `/tokens/authentication` resource (login and logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ironlog_core::error::CoreError;
use ironlog_core::tokens::scopes;
use ironlog_core::types::Timestamp;
use ironlog_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::Credential;
use crate::auth::tokens::TokenService;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tokens/authentication`.
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    pub username: String,
    pub password: String,
}

/// A newly issued token. `token` is the only time the plaintext is exposed.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expiry: Timestamp,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/tokens/authentication
///
/// Exchange username + password for an `auth` token. Unknown users and wrong
/// passwords get the same 401.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    Json(input): Json<CreateTokenRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = Credential::from_hash(user.password_hash)
        .matches(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let (token, record) = TokenService::issue(
        &state.pool,
        user.id,
        state.config.tokens.auth_ttl(),
        scopes::AUTH,
    )
    .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IssuedToken {
                token,
                expiry: record.expiry,
            },
        }),
    ))
}

/// DELETE /api/v1/tokens/authentication
///
/// Log out everywhere: revoke every `auth` token of the caller.
pub async fn revoke_authentication_tokens(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let revoked = TokenService::revoke_all(&state.pool, auth.user_id, scopes::AUTH).await?;

    tracing::info!(user_id = auth.user_id, revoked, "User logged out");

    Ok(StatusCode::NO_CONTENT)
}
