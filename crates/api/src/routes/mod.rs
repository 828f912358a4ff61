pub mod health;
pub mod tokens;
pub mod users;
pub mod workouts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users                       register (public)
/// /users/me                    get, update own profile
/// /users/me/password           change password (revokes auth tokens)
///
/// /tokens/authentication       login (public), logout
///
/// /workouts                    list own, create
/// /workouts/{id}               get, update (owner), delete (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/tokens", tokens::router())
        .nest("/workouts", workouts::router())
}
