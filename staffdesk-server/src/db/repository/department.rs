//! Department Repository

use super::RepoResult;
use shared::models::Department;
use sqlx::SqliteExecutor;

pub async fn list_active(db: impl SqliteExecutor<'_>) -> RepoResult<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, is_active FROM department WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(db)
    .await?;
    Ok(departments)
}

pub async fn find_active_by_id(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, is_active FROM department WHERE id = ? AND is_active = 1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(department)
}

pub async fn find_active_by_code(
    db: impl SqliteExecutor<'_>,
    code: &str,
) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, code, is_active FROM department WHERE code = ? AND is_active = 1 LIMIT 1",
    )
    .bind(code)
    .fetch_optional(db)
    .await?;
    Ok(department)
}
