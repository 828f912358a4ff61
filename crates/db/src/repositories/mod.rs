//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod token_repo;
pub mod user_repo;
pub mod workout_repo;

pub use token_repo::TokenRepo;
pub use user_repo::UserRepo;
pub use workout_repo::WorkoutRepo;
