//! Named counters backing human-readable codes

use super::{RepoError, RepoResult};
use sqlx::SqliteExecutor;

/// Sequence behind `EMP001`-style profile codes
pub const EMPLOYEE_CODE: &str = "employee_code";

/// Advance the counter and return the new value
///
/// Atomic within the caller's transaction; a rolled-back transaction gives
/// its value back.
pub async fn next_value(db: impl SqliteExecutor<'_>, name: &str) -> RepoResult<i64> {
    let value: Option<i64> =
        sqlx::query_scalar("UPDATE code_sequence SET value = value + 1 WHERE name = ? RETURNING value")
            .bind(name)
            .fetch_optional(db)
            .await?;
    value.ok_or_else(|| RepoError::Database(format!("Sequence {name} is not initialised")))
}
