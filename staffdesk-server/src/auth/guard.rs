//! Fresh authorization for sensitive mutations
//!
//! Token claims may be up to a day old. Before changing accounts or profiles
//! the caller's role and active flag are re-read from the store.

use shared::models::{Account, Role};
use shared::{AppError, AppResult};

use crate::auth::{CurrentUser, Permission, permissions};
use crate::core::AppState;
use crate::db::repository::account;
use crate::security_log;

/// Caller state as stored right now
#[derive(Debug, Clone)]
pub struct FreshIdentity {
    pub account: Account,
    pub role: Role,
}

/// Re-load the caller and check `permission` against the stored role
///
/// - account gone: 401 NotAuthenticated
/// - account inactive: 403 AccountDisabled
/// - stored role lacks the permission: 403 PermissionDenied
pub async fn authorize_fresh(
    state: &AppState,
    user: &CurrentUser,
    permission: Permission,
) -> AppResult<FreshIdentity> {
    let Some(stored) = account::find_by_id(&state.pool, &user.id).await? else {
        security_log!("WARN", "auth_failed", user_id = user.id.clone(), error = "account missing");
        return Err(AppError::not_authenticated());
    };

    if !stored.is_active {
        security_log!("WARN", "account_inactive", user_id = user.id.clone());
        return Err(AppError::account_disabled());
    }

    let role = stored
        .role()
        .ok_or_else(|| AppError::internal(format!("Account {} has unknown role", stored.id)))?;

    if !permissions::role_has_permission(role, permission) {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = user.id.clone(),
            token_role = user.role.as_str(),
            stored_role = role.as_str(),
            required_permission = permission.as_str()
        );
        return Err(AppError::forbidden(format!("Permission denied: {}", permission)));
    }

    Ok(FreshIdentity {
        account: stored,
        role,
    })
}
