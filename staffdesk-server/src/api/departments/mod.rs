//! Department API Module

use axum::{Json, Router, extract::State, middleware, routing::get};
use shared::AppResult;
use shared::models::Department;

use crate::auth::{Permission, require_permission};
use crate::core::AppState;
use crate::db::repository::department;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/departments", get(list))
        .layer(middleware::from_fn(require_permission(
            Permission::DepartmentsRead,
        )))
}

/// Active departments, by name
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let departments = department::list_active(&state.pool).await?;
    Ok(Json(departments))
}
