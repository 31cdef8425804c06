//! Employee API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{Permission, require_permission};
use crate::core::AppState;

/// Employee router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<AppState> {
    // Listing needs directory access. Single reads and updates are scoped in
    // the handler, since every role may read and edit its own profile.
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission(
            Permission::EmployeesRead,
        )))
        .route("/{id}", get(handler::get_by_id).put(handler::update));

    // Mutations: HR/ADMIN, re-checked against the store in each handler
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            Permission::EmployeesUpdate,
        )));

    read_routes.merge(manage_routes)
}
