//! Public account projection

use shared::models::{Account, DepartmentRef, ProfileSummary, UserInfo};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

use crate::db::repository::employee;
use crate::services::registration::Enrolled;

/// Project an account and optional profile for the client
pub fn to_user_info(account: Account, profile: Option<ProfileSummary>) -> AppResult<UserInfo> {
    let role = account
        .role()
        .ok_or_else(|| AppError::internal(format!("Account {} has unknown role", account.id)))?;

    Ok(UserInfo {
        id: account.id,
        email: account.email,
        username: account.username,
        role,
        is_active: account.is_active,
        employee: profile,
    })
}

/// Projection of a freshly stored account, loading its profile
pub async fn load_user_info(pool: &SqlitePool, account: Account) -> AppResult<UserInfo> {
    let profile = employee::find_summary(pool, &account.id).await?;
    to_user_info(account, profile)
}

impl Enrolled {
    /// Projection of the rows just written, without another read
    pub fn into_user_info(self) -> AppResult<UserInfo> {
        let profile = ProfileSummary {
            id: self.employee.id,
            employee_code: self.employee.employee_code,
            first_name: self.employee.first_name,
            last_name: self.employee.last_name,
            position: self.employee.position,
            department: Some(DepartmentRef {
                id: self.department.id,
                name: self.department.name,
                code: self.department.code,
            }),
        };
        to_user_info(self.account, Some(profile))
    }
}
