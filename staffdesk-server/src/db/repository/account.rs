//! Account Repository

use super::{RepoError, RepoResult};
use shared::models::{Account, Role};
use sqlx::SqliteExecutor;

const COLUMNS: &str =
    "id, email, username, password_hash, role, is_active, created_at, updated_at";

pub async fn find_by_email(db: impl SqliteExecutor<'_>, email: &str) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {COLUMNS} FROM account WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(account)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: &str) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM account WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(account)
}

/// Which identity field is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Email,
    Username,
}

/// Report an existing account using `email` or `username`; email wins when both clash
pub async fn find_conflict(
    db: impl SqliteExecutor<'_>,
    email: &str,
    username: &str,
) -> RepoResult<Option<Conflict>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT email, username FROM account WHERE email = ?1 OR username = ?2")
            .bind(email)
            .bind(username)
            .fetch_all(db)
            .await?;

    if rows.iter().any(|(e, _)| e == email) {
        return Ok(Some(Conflict::Email));
    }
    if rows.iter().any(|(_, u)| u == username) {
        return Ok(Some(Conflict::Username));
    }
    Ok(None)
}

pub async fn insert(db: impl SqliteExecutor<'_>, account: &Account) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO account (id, email, username, password_hash, role, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(&account.role)
    .bind(account.is_active)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Change role and/or active flag; `None` keeps the stored value
pub async fn update_role_status(
    db: impl SqliteExecutor<'_>,
    id: &str,
    role: Option<Role>,
    is_active: Option<bool>,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE account SET role = COALESCE(?1, role), is_active = COALESCE(?2, is_active), updated_at = ?3 WHERE id = ?4",
    )
    .bind(role.map(|r| r.as_str()))
    .bind(is_active)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Account {id}")));
    }
    Ok(())
}
