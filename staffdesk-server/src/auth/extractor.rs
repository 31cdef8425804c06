//! CurrentUser extractor
//!
//! Reads the identity injected by the session gate, or verifies the session
//! cookie itself when the handler is mounted without the gate.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;

use crate::auth::CurrentUser;
use crate::auth::cookie::read_session_token;
use crate::core::AppState;
use crate::security_log;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Some(token) = read_session_token(&parts.headers) else {
            security_log!("WARN", "auth_missing", uri = parts.uri.path().to_string());
            return Err(AppError::not_authenticated());
        };

        match state.get_jwt_service().validate_token(&token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = e.to_string(),
                    uri = parts.uri.path().to_string()
                );
                if e.is_expired() {
                    Err(AppError::token_expired())
                } else {
                    Err(AppError::invalid_token())
                }
            }
        }
    }
}
