//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::AppState;

/// Build authentication router
/// - /api/auth/login, /api/auth/signup, /api/auth/logout: public
/// - /api/auth/me: protected (session gate applied at the top-level router)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/logout", post(handler::logout))
        .route("/api/auth/me", get(handler::me))
}
