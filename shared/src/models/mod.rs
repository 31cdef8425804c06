//! Data models shared between the server and its clients
//!
//! Row structs derive `sqlx::FromRow` behind the `db` feature.

pub mod account;
pub mod department;
pub mod employee;
pub mod role;

pub use account::{
    Account, AccountUpdate, DepartmentRef, LoginRequest, LoginResponse, ProfileSummary,
    SignupRequest, SignupResponse, UserInfo,
};
pub use department::Department;
pub use employee::{Employee, EmployeeCreate, EmployeeRecord, EmployeeUpdate, EmploymentStatus};
pub use role::Role;
