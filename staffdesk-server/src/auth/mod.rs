//! Authentication and authorization
//!
//! - [`JwtService`] - session token issuing and verification
//! - [`CurrentUser`] - authenticated caller, injected per request
//! - [`require_session`] - route-class session gate
//! - [`require_permission`] - role permission layer
//! - [`authorize_fresh`] - store-backed re-check for sensitive mutations

pub mod cookie;
pub mod extractor;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use guard::{FreshIdentity, authorize_fresh};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenSubject};
pub use middleware::{RouteClass, classify, require_permission, require_session};
pub use permissions::{Permission, Scope};
