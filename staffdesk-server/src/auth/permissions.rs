//! Permission Definitions
//!
//! Static role-based table. Roles are fixed, so the table is compiled in
//! rather than stored.

use std::fmt;

use shared::models::Role;

/// Capability checked by handlers and the permission middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ProfileReadOwn,
    ProfileUpdateOwn,
    EmployeesRead,
    EmployeesCreate,
    EmployeesUpdate,
    AccountsManage,
    DepartmentsRead,
}

impl Permission {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ProfileReadOwn => "profile:read_own",
            Permission::ProfileUpdateOwn => "profile:update_own",
            Permission::EmployeesRead => "employees:read",
            Permission::EmployeesCreate => "employees:create",
            Permission::EmployeesUpdate => "employees:update",
            Permission::AccountsManage => "accounts:manage",
            Permission::DepartmentsRead => "departments:read",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every authenticated account
pub const EMPLOYEE_PERMISSIONS: &[Permission] = &[
    Permission::ProfileReadOwn,
    Permission::ProfileUpdateOwn,
    Permission::DepartmentsRead,
];

/// Team leads: read access to their direct reports
pub const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ProfileReadOwn,
    Permission::ProfileUpdateOwn,
    Permission::DepartmentsRead,
    Permission::EmployeesRead,
];

pub const HR_PERMISSIONS: &[Permission] = &[
    Permission::ProfileReadOwn,
    Permission::ProfileUpdateOwn,
    Permission::DepartmentsRead,
    Permission::EmployeesRead,
    Permission::EmployeesCreate,
    Permission::EmployeesUpdate,
];

pub const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ProfileReadOwn,
    Permission::ProfileUpdateOwn,
    Permission::DepartmentsRead,
    Permission::EmployeesRead,
    Permission::EmployeesCreate,
    Permission::EmployeesUpdate,
    Permission::AccountsManage,
];

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Employee => EMPLOYEE_PERMISSIONS,
        Role::Manager => MANAGER_PERMISSIONS,
        Role::Hr => HR_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
    }
}

pub fn role_has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Which profiles a role may read in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the caller's own profile
    Own,
    /// The caller's profile and direct reports
    Subordinates,
    All,
}

pub fn employee_read_scope(role: Role) -> Scope {
    match role {
        Role::Employee => Scope::Own,
        Role::Manager => Scope::Subordinates,
        Role::Hr | Role::Admin => Scope::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_reads_own_profile() {
        for role in Role::ALL {
            assert!(role_has_permission(role, Permission::ProfileReadOwn));
            assert!(role_has_permission(role, Permission::ProfileUpdateOwn));
            assert!(role_has_permission(role, Permission::DepartmentsRead));
        }
    }

    #[test]
    fn test_employee_cannot_read_directory() {
        assert!(!role_has_permission(Role::Employee, Permission::EmployeesRead));
    }

    #[test]
    fn test_manager_reads_but_does_not_write() {
        assert!(role_has_permission(Role::Manager, Permission::EmployeesRead));
        assert!(!role_has_permission(Role::Manager, Permission::EmployeesCreate));
        assert!(!role_has_permission(Role::Manager, Permission::EmployeesUpdate));
    }

    #[test]
    fn test_only_admin_manages_accounts() {
        for role in Role::ALL {
            assert_eq!(
                role_has_permission(role, Permission::AccountsManage),
                role == Role::Admin
            );
        }
    }

    #[test]
    fn test_tables_are_nested() {
        let ladder = [Role::Employee, Role::Manager, Role::Hr, Role::Admin];
        for pair in ladder.windows(2) {
            for p in permissions_for(pair[0]) {
                assert!(role_has_permission(pair[1], *p), "{} lacks {p}", pair[1]);
            }
        }
    }

    #[test]
    fn test_read_scopes() {
        assert_eq!(employee_read_scope(Role::Employee), Scope::Own);
        assert_eq!(employee_read_scope(Role::Manager), Scope::Subordinates);
        assert_eq!(employee_read_scope(Role::Hr), Scope::All);
        assert_eq!(employee_read_scope(Role::Admin), Scope::All);
    }

    #[test]
    fn test_permission_names() {
        assert_eq!(Permission::AccountsManage.to_string(), "accounts:manage");
        assert_eq!(Permission::ProfileReadOwn.as_str(), "profile:read_own");
    }
}
