//! Route definitions for the `/workouts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workouts;
use crate::state::AppState;

/// Routes mounted at `/workouts`.
///
/// ```text
/// GET, POST           /       -> list_workouts, create_workout
/// GET, PUT, DELETE    /{id}   -> get_workout, update_workout, delete_workout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route(
            "/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
}
