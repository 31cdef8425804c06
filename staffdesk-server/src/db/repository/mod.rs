//! Repository Module
//!
//! Free functions over `sqlx` executors, one file per table. Functions that
//! take `&mut SqliteConnection` run inside the caller's transaction.

pub mod account;
pub mod department;
pub mod employee;
pub mod sequence;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique index violation; carries the offending column
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(unique_column(db_err.message()).to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Validation("Referenced record does not exist".into());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Column named in a SQLite unique-constraint message
///
/// `"UNIQUE constraint failed: account.email"` yields `"email"`.
fn unique_column(message: &str) -> &str {
    message
        .rsplit_once("failed: ")
        .map(|(_, cols)| cols)
        .and_then(|cols| cols.split(',').next())
        .and_then(|col| col.trim().rsplit('.').next())
        .unwrap_or(message)
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(column) => match column.as_str() {
                "email" => AppError::new(ErrorCode::EmailExists),
                "username" => AppError::new(ErrorCode::UsernameExists),
                "employee_code" => AppError::new(ErrorCode::EmployeeCodeExists),
                _ => AppError::with_message(ErrorCode::AlreadyExists, "Record already exists")
                    .with_detail("field", column),
            },
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
