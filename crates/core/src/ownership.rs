//! Owner-only mutation rule.
//!
//! The caller resolves the acting user and the resource owner; this module
//! only decides. Callers must look up the owner (and fail with `NotFound`)
//! before asking, so a missing resource never reaches the forbidden check.

use crate::error::CoreError;
use crate::types::DbId;

/// Ensure `acting_user_id` owns a resource owned by `owner_id`.
///
/// `acting_user_id` is `None` for anonymous callers, which are rejected with
/// `Unauthorized` regardless of the owner. `action` is used in the error
/// message (e.g. "update", "delete").
pub fn ensure_owner(
    entity: &'static str,
    owner_id: DbId,
    acting_user_id: Option<DbId>,
    action: &str,
) -> Result<(), CoreError> {
    let Some(acting_user_id) = acting_user_id else {
        return Err(CoreError::Unauthorized(
            "Authentication required".into(),
        ));
    };

    if owner_id != acting_user_id {
        return Err(CoreError::Forbidden(format!(
            "Cannot {action} another user's {}",
            entity.to_lowercase()
        )));
    }

    Ok(())
}
