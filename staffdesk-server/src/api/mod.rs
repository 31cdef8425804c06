//! HTTP routes
//!
//! - [`auth`] - login, signup, me, logout
//! - [`employees`] - employee directory
//! - [`accounts`] - account administration
//! - [`departments`] - department listing
//! - [`health`] - health check
//! - [`pages`] - HTML page shells

pub mod accounts;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod health;
pub mod pages;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::require_session;
use crate::core::AppState;

/// Full application router with the session gate installed
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(employees::router())
        .merge(accounts::router())
        .merge(departments::router())
        .merge(pages::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
