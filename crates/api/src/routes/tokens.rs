//! Route definitions for the `/tokens` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Routes mounted at `/tokens`.
///
/// ```text
/// POST   /authentication  -> create_authentication_token (public)
/// DELETE /authentication  -> revoke_authentication_tokens
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/authentication",
        post(tokens::create_authentication_token).delete(tokens::revoke_authentication_tokens),
    )
}
