//! Session middleware
//!
//! Classifies every request path and gates protected routes on a valid
//! session cookie.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use shared::AppError;

use crate::auth::cookie::{expired_session_cookie, read_session_token};
use crate::auth::{CurrentUser, Permission};
use crate::core::AppState;
use crate::security_log;

/// Where unauthenticated page requests are sent
pub const LOGIN_PAGE: &str = "/login";

/// Paths reachable without a session (exact match)
pub const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/signup",
    "/api/auth/login",
    "/api/auth/signup",
    "/api/auth/logout",
    "/api/health",
];

const STATIC_PREFIXES: &[&str] = &["/_next", "/static/", "/assets/"];

/// How the session gate treats a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Static,
    /// `/api/...`: failures answer with 401 JSON
    ProtectedApi,
    /// Everything else: failures redirect to the login page
    ProtectedPage,
}

pub fn classify(path: &str) -> RouteClass {
    if PUBLIC_PATHS.contains(&path) {
        return RouteClass::Public;
    }
    if path == "/api" || path.starts_with("/api/") {
        return RouteClass::ProtectedApi;
    }
    if is_static_path(path) {
        return RouteClass::Static;
    }
    RouteClass::ProtectedPage
}

fn is_static_path(path: &str) -> bool {
    if path == "/favicon.ico" || STATIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }
    // Last segment looks like a file name
    path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Session gate, installed once around the whole router
///
/// On success injects [`CurrentUser`] into the request extensions.
///
/// | Situation | API | Page |
/// |-----------|-----|------|
/// | no cookie | 401 NotAuthenticated | redirect to `/login` |
/// | expired token | 401 TokenExpired, cookie cleared | redirect, cookie cleared |
/// | invalid token | 401 TokenInvalid, cookie cleared | redirect, cookie cleared |
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let class = classify(req.uri().path());

    if req.method() == http::Method::OPTIONS
        || matches!(class, RouteClass::Public | RouteClass::Static)
    {
        return next.run(req).await;
    }

    let Some(token) = read_session_token(req.headers()) else {
        security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
        return reject(class, AppError::not_authenticated(), None);
    };

    match state.get_jwt_service().validate_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(CurrentUser::from(claims));
            next.run(req).await
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().path().to_string()
            );

            let err = if e.is_expired() {
                AppError::token_expired()
            } else {
                AppError::invalid_token()
            };
            let clear = expired_session_cookie(state.config.secure_cookies());
            reject(class, err, Some(clear))
        }
    }
}

fn reject(class: RouteClass, err: AppError, clear: Option<Cookie<'static>>) -> Response {
    let jar = match clear {
        Some(cookie) => CookieJar::new().add(cookie),
        None => CookieJar::new(),
    };

    match class {
        RouteClass::ProtectedApi => (jar, err).into_response(),
        _ => (jar, Redirect::to(LOGIN_PAGE)).into_response(),
    }
}

/// Permission check layer - requires a capability from the caller's role
///
/// Uses the claims injected by [`require_session`]; handlers performing
/// sensitive mutations additionally call [`crate::auth::authorize_fresh`].
///
/// ```ignore
/// Router::new()
///     .route("/api/accounts/{id}", patch(handler::update))
///     .layer(middleware::from_fn(require_permission(Permission::AccountsManage)));
/// ```
pub fn require_permission(
    permission: Permission,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    role = user.role.as_str(),
                    required_permission = permission.as_str()
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
