//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use shared::models::{EmployeeCreate, EmployeeRecord, EmployeeUpdate, Role};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::auth::password::hash_password_async;
use crate::auth::{CurrentUser, Permission, authorize_fresh, permissions};
use crate::core::AppState;
use crate::db::repository::account::{self, Conflict};
use crate::db::repository::employee;
use crate::services::directory;
use crate::services::registration::{self, NewMember};
use crate::services::validation::IdentityInput;

/// List profiles visible to the caller
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<EmployeeRecord>>> {
    let records = directory::list_visible(&state.pool, &user).await?;
    Ok(Json(records))
}

/// Get one profile by id
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeRecord>> {
    let record = directory::get_visible(&state.pool, &user, &id).await?;
    Ok(Json(record))
}

/// Create an account and its profile (HR/ADMIN)
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    WithRejection(Json(payload), _): WithRejection<Json<EmployeeCreate>, AppError>,
) -> AppResult<(StatusCode, Json<EmployeeRecord>)> {
    let actor = authorize_fresh(&state, &user, Permission::EmployeesCreate).await?;

    let role = payload.role.unwrap_or(Role::Employee);
    if role != Role::Employee
        && !permissions::role_has_permission(actor.role, Permission::AccountsManage)
    {
        return Err(AppError::with_message(
            ErrorCode::AdminRequired,
            "Only administrators can assign elevated roles",
        ));
    }

    let input = IdentityInput::parse(
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.username,
        &payload.password,
    )?;

    match account::find_conflict(&state.pool, &input.email, &input.username).await? {
        Some(Conflict::Email) => return Err(AppError::new(ErrorCode::EmailExists)),
        Some(Conflict::Username) => return Err(AppError::new(ErrorCode::UsernameExists)),
        None => {}
    }

    let password_hash = hash_password_async(payload.password).await?;

    let enrolled = registration::enroll(
        &state.pool,
        &state.config,
        NewMember {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            username: input.username,
            password_hash,
            role,
            position: payload.position.map(|p| p.trim().to_string()),
            phone: payload.phone.map(|p| p.trim().to_string()),
            department_id: payload.department_id,
            manager_id: payload
                .manager_id
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
        },
    )
    .await?;

    let record = employee::find_record(&state.pool, &enrolled.employee.id)
        .await?
        .ok_or_else(|| AppError::internal("Created employee not readable"))?;

    tracing::info!(
        employee_id = %record.id,
        actor = %user.id,
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a profile
///
/// HR/ADMIN may change any profile. Every role may change the phone on its
/// own profile.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<EmployeeUpdate>, AppError>,
) -> AppResult<Json<EmployeeRecord>> {
    let is_own = user.employee_id.as_deref() == Some(id.as_str());
    if !is_own {
        authorize_fresh(&state, &user, Permission::EmployeesUpdate).await?;
        return Ok(Json(directory::update_employee(&state.pool, &id, &payload).await?));
    }

    let actor = authorize_fresh(&state, &user, Permission::ProfileUpdateOwn).await?;
    let record = if permissions::role_has_permission(actor.role, Permission::EmployeesUpdate) {
        directory::update_employee(&state.pool, &id, &payload).await?
    } else {
        directory::update_own_profile(&state.pool, &id, &payload).await?
    };
    Ok(Json(record))
}

/// Soft-delete a profile (ADMIN)
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    authorize_fresh(&state, &user, Permission::AccountsManage).await?;
    directory::deactivate_employee(&state.pool, &user, &id).await?;
    Ok(ApiResponse::message("Employee deactivated"))
}
