//! Account Model (login identity)

use serde::{Deserialize, Serialize};

use super::Role;

/// Account row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Stored as text, see [`Role::from_db`]
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Parsed role; rows are constrained by a CHECK so `None` means corrupt data
    pub fn role(&self) -> Option<Role> {
        Role::from_db(&self.role)
    }
}

/// Login payload
///
/// Missing fields deserialize to empty strings so the handler can answer
/// with a validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Self-service signup payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
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
}

/// Admin account update (role change / activation toggle)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// Department fields embedded in a profile summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// Profile fields embedded in the public account projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: Option<DepartmentRef>,
}

/// Public account projection returned by login, signup and `me`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub employee: Option<ProfileSummary>,
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub message: String,
}

/// Signup response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            id: "a1".into(),
            email: "jane@x.com".into(),
            username: "janedoe".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: "EMPLOYEE".into(),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert_eq!(account.role(), Some(Role::Employee));
    }

    #[test]
    fn test_signup_request_accepts_camel_case() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"firstName":"Jane","lastName":"Doe","email":"jane@x.com","username":"janedoe","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Jane");
        assert_eq!(req.last_name, "Doe");
    }

    #[test]
    fn test_login_request_missing_fields_default_to_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"email":"jane@x.com"}"#).unwrap();
        assert_eq!(req.email, "jane@x.com");
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_user_info_shape() {
        let info = UserInfo {
            id: "a1".into(),
            email: "jane@x.com".into(),
            username: "janedoe".into(),
            role: Role::Employee,
            is_active: true,
            employee: Some(ProfileSummary {
                id: "e1".into(),
                employee_code: "EMP001".into(),
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                position: "Employee".into(),
                department: None,
            }),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["role"], "EMPLOYEE");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["employee"]["employeeCode"], "EMP001");
        assert_eq!(value["employee"]["firstName"], "Jane");
    }
}
