//! Account administration routes

mod handler;

use axum::{Router, middleware, routing::patch};

use crate::auth::{Permission, require_permission};
use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/accounts/{id}", patch(handler::update))
        .layer(middleware::from_fn(require_permission(
            Permission::AccountsManage,
        )))
}
