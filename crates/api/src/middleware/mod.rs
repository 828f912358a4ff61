//! Request extractors that resolve the caller's identity.
//!
//! - [`auth::ActingUser`] -- Authenticated user or anonymous caller.
//! - [`auth::AuthUser`] -- Requires an authenticated user.

pub mod auth;
