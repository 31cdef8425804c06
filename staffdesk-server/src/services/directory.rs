//! Employee directory: scoped reads and referential checks on change

use shared::models::{AccountUpdate, EmployeeRecord, EmployeeUpdate, EmploymentStatus, Role, UserInfo};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::{SqliteConnection, SqlitePool};

use crate::auth::permissions::employee_read_scope;
use crate::auth::{CurrentUser, Permission, Scope};
use crate::db::repository::employee::ProfileChanges;
use crate::db::repository::{RepoError, account, department, employee};
use crate::services::profile::load_user_info;

/// Longest management chain walked when checking for cycles
const MAX_CHAIN_DEPTH: usize = 1024;

fn employee_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id)
}

/// Profiles the caller may list: everyone for HR/ADMIN, direct reports for MANAGER
pub async fn list_visible(pool: &SqlitePool, user: &CurrentUser) -> AppResult<Vec<EmployeeRecord>> {
    let records = match employee_read_scope(user.role) {
        Scope::All => employee::list_records(pool).await?,
        Scope::Subordinates => match user.employee_id.as_deref() {
            Some(own) => employee::list_by_manager(pool, own).await?,
            None => Vec::new(),
        },
        Scope::Own => return Err(AppError::forbidden("Permission denied: employees:read")),
    };
    Ok(records)
}

/// One profile: always the caller's own, a MANAGER's direct reports, anything for HR/ADMIN
pub async fn get_visible(pool: &SqlitePool, user: &CurrentUser, id: &str) -> AppResult<EmployeeRecord> {
    let is_self = user.employee_id.as_deref() == Some(id);
    let scope = employee_read_scope(user.role);

    if is_self && !user.has_permission(Permission::ProfileReadOwn) {
        return Err(AppError::forbidden("Permission denied: profile:read_own"));
    }
    if !is_self && scope == Scope::Own {
        return Err(AppError::forbidden("Permission denied: employees:read"));
    }

    let record = employee::find_record(pool, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    if !is_self
        && scope == Scope::Subordinates
        && record.manager_id.as_deref() != user.employee_id.as_deref()
    {
        return Err(AppError::forbidden("Employee is not a direct report"));
    }

    Ok(record)
}

fn non_blank<'a>(field: &str, value: Option<&'a String>) -> AppResult<Option<&'a str>> {
    match value.map(|v| v.trim()) {
        Some("") => Err(AppError::required(format!("{field} cannot be empty"))),
        other => Ok(other),
    }
}

/// Reject a manager assignment that is missing or would close a loop
async fn check_manager(conn: &mut SqliteConnection, employee_id: &str, manager_id: &str) -> AppResult<()> {
    if manager_id == employee_id {
        return Err(AppError::with_message(
            ErrorCode::ManagerCycle,
            "An employee cannot be their own manager",
        ));
    }

    let mut current = match employee::manager_of(&mut *conn, manager_id).await? {
        Some(next) => next,
        None => {
            return Err(AppError::new(ErrorCode::ManagerNotFound).with_detail("managerId", manager_id));
        }
    };

    for _ in 0..MAX_CHAIN_DEPTH {
        let Some(id) = current else {
            return Ok(());
        };
        if id == employee_id {
            return Err(AppError::new(ErrorCode::ManagerCycle));
        }
        current = employee::manager_of(&mut *conn, &id).await?.flatten();
    }

    Err(AppError::new(ErrorCode::ManagerCycle))
}

/// Apply a profile update after re-checking department and manager references
pub async fn update_employee(
    pool: &SqlitePool,
    id: &str,
    update: &EmployeeUpdate,
) -> AppResult<EmployeeRecord> {
    let changes = ProfileChanges {
        first_name: non_blank("First name", update.first_name.as_ref())?,
        last_name: non_blank("Last name", update.last_name.as_ref())?,
        position: non_blank("Position", update.position.as_ref())?,
        phone: update.phone.as_deref().map(str::trim),
        department_id: update.department_id,
        manager_id: update
            .manager_id
            .as_ref()
            .map(|m| m.as_deref().map(str::trim).filter(|m| !m.is_empty())),
        employment_status: update.employment_status,
    };

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if !employee::lock_for_update(&mut *tx, id).await? {
        return Err(employee_not_found(id));
    }

    if let Some(department_id) = changes.department_id
        && department::find_active_by_id(&mut *tx, department_id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::DepartmentNotFound).with_detail("departmentId", department_id));
    }

    if let Some(Some(manager_id)) = changes.manager_id {
        check_manager(&mut *tx, id, manager_id).await?;
    }

    employee::update(&mut *tx, id, &changes, now_millis()).await?;
    let record = employee::find_record(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    tx.commit().await.map_err(RepoError::from)?;
    Ok(record)
}

/// Self-service edit: only `phone` may change on one's own profile
pub async fn update_own_profile(
    pool: &SqlitePool,
    id: &str,
    update: &EmployeeUpdate,
) -> AppResult<EmployeeRecord> {
    let restricted = update.first_name.is_some()
        || update.last_name.is_some()
        || update.position.is_some()
        || update.department_id.is_some()
        || update.manager_id.is_some()
        || update.employment_status.is_some();
    if restricted {
        return Err(AppError::forbidden("Only phone can be changed on your own profile"));
    }
    if update.phone.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }

    update_employee(
        pool,
        id,
        &EmployeeUpdate {
            phone: update.phone.clone(),
            ..Default::default()
        },
    )
    .await
}

/// Soft delete: deactivate the account and mark the profile terminated
pub async fn deactivate_employee(pool: &SqlitePool, actor: &CurrentUser, id: &str) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    if !employee::lock_for_update(&mut *tx, id).await? {
        return Err(employee_not_found(id));
    }

    let target = employee::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    if target.account_id == actor.id {
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }

    let now = now_millis();
    account::update_role_status(&mut *tx, &target.account_id, None, Some(false), now).await?;
    let changes = ProfileChanges {
        employment_status: Some(EmploymentStatus::Terminated),
        ..Default::default()
    };
    employee::update(&mut *tx, id, &changes, now).await?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(employee_id = %id, account_id = %target.account_id, actor = %actor.id, "Employee deactivated");
    Ok(())
}

/// Role change / activation toggle; an admin cannot demote or deactivate themselves
pub async fn update_account(
    pool: &SqlitePool,
    actor: &CurrentUser,
    account_id: &str,
    update: &AccountUpdate,
) -> AppResult<UserInfo> {
    if update.role.is_none() && update.is_active.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }

    if account_id == actor.id
        && (update.is_active == Some(false) || update.role.is_some_and(|r| r != Role::Admin))
    {
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }

    account::update_role_status(pool, account_id, update.role, update.is_active, now_millis())
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::AccountNotFound),
            other => other.into(),
        })?;

    let stored = account::find_by_id(pool, account_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    tracing::info!(
        account_id = %account_id,
        actor = %actor.id,
        role = %stored.role,
        is_active = stored.is_active,
        "Account updated"
    );

    load_user_info(pool, stored).await
}
