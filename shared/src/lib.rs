//! Shared types for Staffdesk
//!
//! Error codes, the unified API response format and the domain models used
//! by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
