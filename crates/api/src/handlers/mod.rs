//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `ironlog_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod tokens;
pub mod users;
pub mod workouts;
