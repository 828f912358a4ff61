//! Pure domain logic for the ironlog workout tracker.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these types and validation rules.

pub mod error;
pub mod hashing;
pub mod ownership;
pub mod pagination;
pub mod tokens;
pub mod types;
pub mod users;
pub mod workout;
