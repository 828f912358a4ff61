//! Handlers for the `/workouts` resource.
//!
//! Reads require an authenticated user. Updates and deletes are owner-only
//! and go through [`authorize_mutation`] before anything is written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ironlog_core::error::CoreError;
use ironlog_core::ownership::ensure_owner;
use ironlog_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use ironlog_core::types::DbId;
use ironlog_db::models::workout::{CreateWorkout, UpdateWorkout};
use ironlog_db::repositories::WorkoutRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{ActingUser, AuthUser};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check that `acting` may mutate workout `workout_id`.
///
/// Runs in a fixed order: anonymous callers get `Unauthorized`, a missing
/// workout gets `NotFound`, and only then is ownership compared, so a
/// non-existent id never reports `Forbidden`.
pub async fn authorize_mutation(
    pool: &PgPool,
    workout_id: DbId,
    acting: &ActingUser,
    action: &str,
) -> AppResult<()> {
    if acting.is_anonymous() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Authentication required".into(),
        )));
    }

    let owner_id = WorkoutRepo::get_owner(pool, workout_id).await?;
    ensure_owner("Workout", owner_id, acting.user_id(), action)?;
    Ok(())
}

fn workout_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workout",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/workouts
///
/// Create a workout with its entries, owned by the caller. Returns 201; 400
/// if any entry is invalid, in which case nothing is stored.
pub async fn create_workout(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkout>,
) -> AppResult<impl IntoResponse> {
    let workout = WorkoutRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        workout_id = workout.workout.id,
        user_id = auth.user_id,
        entry_count = workout.entries.len(),
        "Workout created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: workout })))
}

/// GET /api/v1/workouts
///
/// List the caller's own workouts, newest first.
pub async fn list_workouts(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let workouts = WorkoutRepo::list_by_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: workouts }))
}

/// GET /api/v1/workouts/{id}
pub async fn get_workout(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(workout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workout = WorkoutRepo::find_by_id(&state.pool, workout_id)
        .await?
        .ok_or_else(|| workout_not_found(workout_id))?;

    Ok(Json(DataResponse { data: workout }))
}

/// PUT /api/v1/workouts/{id}
///
/// Owner-only partial update. Supplying `entries` replaces the whole entry
/// set; omitting it leaves the entries untouched.
pub async fn update_workout(
    acting: ActingUser,
    State(state): State<AppState>,
    Path(workout_id): Path<DbId>,
    Json(input): Json<UpdateWorkout>,
) -> AppResult<impl IntoResponse> {
    authorize_mutation(&state.pool, workout_id, &acting, "update").await?;

    // The row can disappear between the owner check and the update.
    let workout = WorkoutRepo::update(&state.pool, workout_id, &input)
        .await?
        .ok_or_else(|| workout_not_found(workout_id))?;

    tracing::info!(
        workout_id,
        user_id = acting.user_id(),
        entries_replaced = input.entries.is_some(),
        "Workout updated",
    );

    Ok(Json(DataResponse { data: workout }))
}

/// DELETE /api/v1/workouts/{id}
///
/// Owner-only. Entries are removed with the workout. Returns 204.
pub async fn delete_workout(
    acting: ActingUser,
    State(state): State<AppState>,
    Path(workout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize_mutation(&state.pool, workout_id, &acting, "delete").await?;

    WorkoutRepo::delete(&state.pool, workout_id).await?;

    tracing::info!(workout_id, user_id = acting.user_id(), "Workout deleted");

    Ok(StatusCode::NO_CONTENT)
}
