//! Staffdesk server
//!
//! Session authentication and authorization for the employee management
//! backend, plus the employee directory built on it.
//!
//! ```text
//! staffdesk-server/src/
//! ├── core/       # configuration, shared state
//! ├── auth/       # passwords, tokens, session gate, permissions
//! ├── db/         # SQLite pool, repositories
//! ├── services/   # enrollment, directory rules
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use api::build_app;
pub use auth::{CurrentUser, JwtService};
pub use core::{AppState, Config};
pub use utils::logger::{cleanup_old_logs, init_logger};

/// Security event on the `security` tracing target
///
/// ```ignore
/// security_log!("WARN", "login_failed", email = email.clone(), reason = "wrong_password");
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}
