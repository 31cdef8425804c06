//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role (fixed set, stored as upper-case text)
///
/// Ordering by privilege: `Admin` > `Manager` = `Hr` > `Employee`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Manager,
    Hr,
    Admin,
}

/// Presentation attributes for a role, keyed by the enum
struct RoleDisplay {
    label: &'static str,
    badge_color: &'static str,
}

static ROLE_DISPLAY: [(Role, RoleDisplay); 4] = [
    (
        Role::Employee,
        RoleDisplay {
            label: "Employee",
            badge_color: "green",
        },
    ),
    (
        Role::Manager,
        RoleDisplay {
            label: "Manager",
            badge_color: "blue",
        },
    ),
    (
        Role::Hr,
        RoleDisplay {
            label: "HR",
            badge_color: "purple",
        },
    ),
    (
        Role::Admin,
        RoleDisplay {
            label: "Administrator",
            badge_color: "red",
        },
    ),
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Employee, Role::Manager, Role::Hr, Role::Admin];

    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Manager => "MANAGER",
            Role::Hr => "HR",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse the stored representation; unknown values yield `None`
    pub fn from_db(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    fn display(&self) -> &'static RoleDisplay {
        // ROLE_DISPLAY lists every variant in declaration order
        &ROLE_DISPLAY[*self as usize].1
    }

    pub fn label(&self) -> &'static str {
        self.display().label
    }

    pub fn badge_color(&self) -> &'static str {
        self.display().badge_color
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
