//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /              -> register_user (public)
/// GET  /me            -> get_current_user
/// PUT  /me            -> update_current_user
/// PUT  /me/password   -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register_user))
        .route(
            "/me",
            get(users::get_current_user).put(users::update_current_user),
        )
        .route("/me/password", put(users::change_password))
}
