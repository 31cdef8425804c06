use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use shared::{AppError, AppResult};
use shared::models::{AccountUpdate, UserInfo};

use crate::auth::{CurrentUser, Permission, authorize_fresh};
use crate::core::AppState;
use crate::services::directory;

/// Change an account's role or active flag (ADMIN)
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<AccountUpdate>, AppError>,
) -> AppResult<Json<UserInfo>> {
    authorize_fresh(&state, &user, Permission::AccountsManage).await?;
    let info = directory::update_account(&state.pool, &user, &id, &payload).await?;
    Ok(Json(info))
}
