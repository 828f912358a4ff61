//! Handlers for the `/users` resource (registration and own profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ironlog_core::error::CoreError;
use ironlog_core::tokens::scopes;
use ironlog_core::users::{
    validate_email, validate_password, validate_registration, validate_username,
};
use ironlog_db::models::user::{CreateUser, UpdateUser, UserResponse};
use ironlog_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::Credential;
use crate::auth::tokens::TokenService;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: String,
}

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new account. Returns 201 with the user (never the hash), 400 on
/// invalid fields, 409 if the username or email is taken.
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<impl IntoResponse> {
    validate_registration(
        &input.username,
        &input.email,
        &input.password,
        state.config.min_password_length,
    )?;

    let credential = Credential::set(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash: credential.into_hash(),
            bio: input.bio,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/users/me
pub async fn get_current_user(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/users/me
///
/// Patch the caller's profile. Absent fields are left unchanged.
pub async fn update_current_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref username) = input.username {
        validate_username(username)?;
    }
    if let Some(ref email) = input.email {
        validate_email(email)?;
    }

    let user = UserRepo::update(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = user.id, "User profile updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/users/me/password
///
/// Replace the caller's password after checking the current one, then revoke
/// every auth token of the user (including the one used for this request).
pub async fn change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let current_valid = Credential::from_hash(user.password_hash)
        .matches(&input.current_password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password(&input.new_password, state.config.min_password_length)?;

    let credential = Credential::set(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    UserRepo::update_password(&state.pool, auth.user_id, credential.as_hash()).await?;
    let revoked = TokenService::revoke_all(&state.pool, auth.user_id, scopes::AUTH).await?;

    tracing::info!(user_id = auth.user_id, revoked, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
