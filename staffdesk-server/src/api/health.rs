//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};

use crate::core::AppState;

/// Public route, see `PUBLIC_PATHS`
pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            "unavailable"
        }
    };

    Json(serde_json::json!({
        "status": "ok",
        "service": "staffdesk-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
