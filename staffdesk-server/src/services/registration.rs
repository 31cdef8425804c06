//! Account + profile enrollment
//!
//! Self-signup and admin-initiated creation share this path: one
//! transaction creates the account and its profile, draws the next profile
//! code and validates department and manager references.

use shared::models::{Account, Department, Employee, EmploymentStatus, Role};
use shared::util::now_millis;
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::repository::{RepoError, account, department, employee, sequence};

/// Position given to profiles created without one
pub const DEFAULT_POSITION: &str = "Employee";

/// Validated input for a new account and its profile
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    /// Normalised (trimmed, lower-case)
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub position: Option<String>,
    pub phone: Option<String>,
    /// `None` uses the configured default department
    pub department_id: Option<i64>,
    pub manager_id: Option<String>,
}

/// Rows written by [`enroll`]
#[derive(Debug, Clone)]
pub struct Enrolled {
    pub account: Account,
    pub employee: Employee,
    pub department: Department,
}

/// Profile code from a sequence value: `EMP` + at least three digits
pub fn format_employee_code(prefix: &str, value: i64) -> String {
    format!("{prefix}{value:03}")
}

/// Create account and profile atomically
///
/// Nothing is written unless every step succeeds. Unique-index violations
/// surface as `EmailExists` / `UsernameExists` / `EmployeeCodeExists`.
pub async fn enroll(pool: &SqlitePool, config: &Config, member: NewMember) -> AppResult<Enrolled> {
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    // Write first so the transaction takes the write lock up front
    let sequence_value = sequence::next_value(&mut *tx, sequence::EMPLOYEE_CODE).await?;
    let employee_code = format_employee_code(&config.employee_code_prefix, sequence_value);

    let department = match member.department_id {
        Some(id) => department::find_active_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound).with_detail("departmentId", id))?,
        None => department::find_active_by_code(&mut *tx, &config.default_department_code)
            .await?
            .ok_or_else(|| {
                AppError::config(format!(
                    "Default department {} not found",
                    config.default_department_code
                ))
            })?,
    };

    if let Some(manager_id) = member.manager_id.as_deref()
        && employee::find_by_id(&mut *tx, manager_id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::ManagerNotFound).with_detail("managerId", manager_id));
    }

    let now = now_millis();
    let account = Account {
        id: uuid::Uuid::new_v4().to_string(),
        email: member.email,
        username: member.username,
        password_hash: member.password_hash,
        role: member.role.as_str().to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    account::insert(&mut *tx, &account).await?;

    let employee = Employee {
        id: uuid::Uuid::new_v4().to_string(),
        account_id: account.id.clone(),
        employee_code,
        first_name: member.first_name,
        last_name: member.last_name,
        position: member
            .position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
        phone: member.phone.unwrap_or_default(),
        department_id: department.id,
        manager_id: member.manager_id,
        employment_status: EmploymentStatus::Active.as_str().to_string(),
        joining_date: now,
        created_at: now,
        updated_at: now,
    };
    employee::insert(&mut *tx, &employee).await?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        account_id = %account.id,
        employee_code = %employee.employee_code,
        role = %account.role,
        "Account enrolled"
    );

    Ok(Enrolled {
        account,
        employee,
        department,
    })
}
