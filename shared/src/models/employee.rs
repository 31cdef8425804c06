//! Employee Model (profile linked 1:1 to an account)

use serde::{Deserialize, Deserializer, Serialize};

use super::Role;

/// Employment status of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Terminated,
}

impl EmploymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "ACTIVE",
            EmploymentStatus::OnLeave => "ON_LEAVE",
            EmploymentStatus::Terminated => "TERMINATED",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "ON_LEAVE" => Some(Self::OnLeave),
            "TERMINATED" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// Employee row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub account_id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub department_id: i64,
    pub manager_id: Option<String>,
    pub employment_status: String,
    pub joining_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Directory view: profile joined with its account and department
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: String,
    pub department_id: i64,
    pub department_name: String,
    pub department_code: String,
    pub manager_id: Option<String>,
    pub employment_status: String,
    pub joining_date: i64,
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

/// Admin-initiated account + profile creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Defaults to EMPLOYEE
    pub role: Option<Role>,
    pub position: Option<String>,
    pub phone: Option<String>,
    /// Defaults to the configured default department
    pub department_id: Option<i64>,
    pub manager_id: Option<String>,
}

/// Profile update; absent fields are left unchanged
///
/// `managerId: null` clears the manager, an absent key keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<String>>,
    pub employment_status: Option<EmploymentStatus>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
