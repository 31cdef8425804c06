//! Employee Repository (profiles)

use super::{RepoError, RepoResult};
use shared::models::{DepartmentRef, Employee, EmployeeRecord, EmploymentStatus, ProfileSummary};
use sqlx::SqliteExecutor;

const COLUMNS: &str = "id, account_id, employee_code, first_name, last_name, position, phone, \
     department_id, manager_id, employment_status, joining_date, created_at, updated_at";

const RECORD_SELECT: &str = "SELECT e.id, e.employee_code, e.first_name, e.last_name, e.position, e.phone, \
     e.department_id, d.name AS department_name, d.code AS department_code, e.manager_id, \
     e.employment_status, e.joining_date, e.account_id, a.email, a.username, a.role, a.is_active \
     FROM employee e \
     JOIN account a ON a.id = e.account_id \
     JOIN department d ON d.id = e.department_id";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: &str) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employee WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(employee)
}

/// No-op write on a profile row, false when it does not exist
///
/// Issued first inside a transaction so SQLite hands out the write lock
/// before any read, instead of failing the upgrade with `SQLITE_BUSY`.
pub async fn lock_for_update(db: impl SqliteExecutor<'_>, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE employee SET updated_at = updated_at WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: String,
    employee_code: String,
    first_name: String,
    last_name: String,
    position: String,
    department_id: i64,
    department_name: String,
    department_code: String,
}

/// Profile summary embedded in the account projection
pub async fn find_summary(
    db: impl SqliteExecutor<'_>,
    account_id: &str,
) -> RepoResult<Option<ProfileSummary>> {
    let row = sqlx::query_as::<_, SummaryRow>(
        "SELECT e.id, e.employee_code, e.first_name, e.last_name, e.position, \
         e.department_id, d.name AS department_name, d.code AS department_code \
         FROM employee e JOIN department d ON d.id = e.department_id \
         WHERE e.account_id = ?",
    )
    .bind(account_id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(|r| ProfileSummary {
        id: r.id,
        employee_code: r.employee_code,
        first_name: r.first_name,
        last_name: r.last_name,
        position: r.position,
        department: Some(DepartmentRef {
            id: r.department_id,
            name: r.department_name,
            code: r.department_code,
        }),
    }))
}

pub async fn find_record(db: impl SqliteExecutor<'_>, id: &str) -> RepoResult<Option<EmployeeRecord>> {
    let record = sqlx::query_as::<_, EmployeeRecord>(&format!("{RECORD_SELECT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(record)
}

pub async fn list_records(db: impl SqliteExecutor<'_>) -> RepoResult<Vec<EmployeeRecord>> {
    let records = sqlx::query_as::<_, EmployeeRecord>(&format!(
        "{RECORD_SELECT} ORDER BY e.employee_code"
    ))
    .fetch_all(db)
    .await?;
    Ok(records)
}

/// Direct reports of `manager_id`
pub async fn list_by_manager(
    db: impl SqliteExecutor<'_>,
    manager_id: &str,
) -> RepoResult<Vec<EmployeeRecord>> {
    let records = sqlx::query_as::<_, EmployeeRecord>(&format!(
        "{RECORD_SELECT} WHERE e.manager_id = ? ORDER BY e.employee_code"
    ))
    .bind(manager_id)
    .fetch_all(db)
    .await?;
    Ok(records)
}

/// Manager of `id`: outer `None` when the profile does not exist
pub async fn manager_of(db: impl SqliteExecutor<'_>, id: &str) -> RepoResult<Option<Option<String>>> {
    let manager: Option<Option<String>> =
        sqlx::query_scalar("SELECT manager_id FROM employee WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(manager)
}

pub async fn insert(db: impl SqliteExecutor<'_>, employee: &Employee) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO employee (id, account_id, employee_code, first_name, last_name, position, phone, \
         department_id, manager_id, employment_status, joining_date, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&employee.id)
    .bind(&employee.account_id)
    .bind(&employee.employee_code)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.position)
    .bind(&employee.phone)
    .bind(employee.department_id)
    .bind(&employee.manager_id)
    .bind(&employee.employment_status)
    .bind(employee.joining_date)
    .bind(employee.created_at)
    .bind(employee.updated_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Validated profile changes; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct ProfileChanges<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub position: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub department_id: Option<i64>,
    /// `Some(None)` clears the manager
    pub manager_id: Option<Option<&'a str>>,
    pub employment_status: Option<EmploymentStatus>,
}

pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: &str,
    changes: &ProfileChanges<'_>,
    now: i64,
) -> RepoResult<()> {
    let (set_manager, manager_id) = match changes.manager_id {
        Some(manager) => (true, manager),
        None => (false, None),
    };

    let rows = sqlx::query(
        "UPDATE employee SET \
         first_name = COALESCE(?1, first_name), \
         last_name = COALESCE(?2, last_name), \
         position = COALESCE(?3, position), \
         phone = COALESCE(?4, phone), \
         department_id = COALESCE(?5, department_id), \
         manager_id = CASE WHEN ?6 THEN ?7 ELSE manager_id END, \
         employment_status = COALESCE(?8, employment_status), \
         updated_at = ?9 \
         WHERE id = ?10",
    )
    .bind(changes.first_name)
    .bind(changes.last_name)
    .bind(changes.position)
    .bind(changes.phone)
    .bind(changes.department_id)
    .bind(set_manager)
    .bind(manager_id)
    .bind(changes.employment_status.map(|s| s.as_str()))
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id}")));
    }
    Ok(())
}
